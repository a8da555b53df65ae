use std::sync::OnceLock;

use crate::{
    attributes::{Attributes, StyleKey},
    rule::Rule,
    styled::StyledText,
};

static MARKDOWN: OnceLock<MarkupEngine> = OnceLock::new();
static MARKLEFT: OnceLock<MarkupEngine> = OnceLock::new();

/// Holds [`Rule`] objects and applies them in order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarkupEngine {
    rules: Vec<Rule>,
}

impl MarkupEngine {
    pub fn new(rules: Vec<Rule>) -> Self {
        log::debug!("creating engine with {} rules", rules.len());

        Self { rules }
    }

    /// `**bold**`, `__bold__`, `~~strikethrough~~`, `` `code` ``, `*italic*`, `_italic_`
    pub fn markdown() -> &'static Self {
        MARKDOWN.get_or_init(|| {
            Self::from_presets(&[
                ("**", StyleKey::Bold),
                ("__", StyleKey::Bold),
                ("~~", StyleKey::Strikethrough),
                ("`", StyleKey::Code),
                ("*", StyleKey::Italic),
                ("_", StyleKey::Italic),
            ])
        })
    }

    /// Chat style single delimiters: `*bold*`, `_italic_`, `~strikethrough~`, `` `code` ``
    pub fn markleft() -> &'static Self {
        MARKLEFT.get_or_init(|| {
            Self::from_presets(&[
                ("*", StyleKey::Bold),
                ("_", StyleKey::Italic),
                ("~", StyleKey::Strikethrough),
                ("`", StyleKey::Code),
            ])
        })
    }

    fn from_presets(presets: &[(&str, StyleKey)]) -> Self {
        Self::new(
            presets
                .iter()
                .map(|(tag, key)| {
                    Rule::new(*tag, *tag, Attributes::new().with(key.clone(), true))
                        .expect("preset tags are not empty")
                })
                .collect(),
        )
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Produces new engine with rules of other. Rules with the same delimiters are replaced in
    /// place, new ones are placed at the end
    #[must_use]
    pub fn extend(&self, other: MarkupEngine) -> Self {
        let mut existing_rules = self.rules.clone();
        let mut appended_rules = Vec::new();

        'outer: for new_rule in other.rules {
            for existing_rule in &mut existing_rules {
                if existing_rule.same_delimiters(&new_rule) {
                    *existing_rule = new_rule;
                    continue 'outer;
                }
            }

            appended_rules.push(new_rule);
        }

        existing_rules.extend(appended_rules);

        Self::new(existing_rules)
    }

    /// Applies rules to unstyled text
    pub fn apply_markup(&self, text: &str) -> StyledText {
        self.apply_markup_to(&StyledText::plain(text))
    }

    /// Walks rules from top to bottom, collapsing every match of each rule before moving to the
    /// next one. Input is left untouched
    pub fn apply_markup_to(&self, text: &StyledText) -> StyledText {
        let mut buffer = text.clone();

        for rule in &self.rules {
            let collapsed = rule.apply(&mut buffer);
            if collapsed != 0 {
                log::trace!("{rule:?} collapsed {collapsed} matches");
            }
        }

        buffer
    }
}

impl From<Vec<Rule>> for MarkupEngine {
    fn from(rules: Vec<Rule>) -> Self {
        Self::new(rules)
    }
}

impl FromIterator<Rule> for MarkupEngine {
    fn from_iter<T: IntoIterator<Item = Rule>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
