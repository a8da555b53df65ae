use std::{error::Error, fmt};

use regex_automata::{
    meta::{BuildError, Regex},
    util::syntax,
};

use crate::{attributes::Attributes, styled::StyledText};

/// Pair of delimiters and attributes given to text between them
#[derive(Clone)]
pub struct Rule {
    opening: String,
    closing: String,
    attributes: Attributes,
    regex: Regex,
}

// regex debug output is huge and says nothing about the rule
#[allow(clippy::missing_fields_in_debug)]
impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("opening", &self.opening)
            .field("closing", &self.closing)
            .field("attributes", &self.attributes)
            .finish()
    }
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.opening == other.opening
            && self.closing == other.closing
            && self.attributes == other.attributes
    }
}

impl Rule {
    /// Creates rule from delimiters. Delimiters are matched literally
    #[allow(clippy::result_large_err)]
    pub fn new(
        opening: impl Into<String>,
        closing: impl Into<String>,
        attributes: Attributes,
    ) -> Result<Self, CreationError> {
        let opening = opening.into();
        let closing = closing.into();

        if opening.is_empty() || closing.is_empty() {
            return Err(CreationError::EmptyTag);
        }

        let regex = Regex::builder()
            .syntax(syntax::Config::new().dot_matches_new_line(true))
            .build(&Self::pattern_for(&opening, &closing))
            .map_err(CreationError::BadRegex)?;

        Ok(Self {
            opening,
            closing,
            attributes,
            regex,
        })
    }

    fn pattern_for(opening: &str, closing: &str) -> String {
        format!(
            "{}(.*?){}",
            regex_syntax::escape(opening),
            regex_syntax::escape(closing)
        )
    }

    pub fn opening(&self) -> &str {
        &self.opening
    }

    pub fn closing(&self) -> &str {
        &self.closing
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Regex source this rule matches with
    pub fn pattern(&self) -> String {
        Self::pattern_for(&self.opening, &self.closing)
    }

    /// Whether rule has anything left to collapse in text
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    pub(crate) fn same_delimiters(&self, other: &Rule) -> bool {
        self.opening == other.opening && self.closing == other.closing
    }

    /// Collapses leftmost match until there are none left. Returns number of collapsed matches
    pub(crate) fn apply(&self, buffer: &mut StyledText) -> usize {
        let mut caps = self.regex.create_captures();
        let mut collapsed = 0;

        loop {
            self.regex.captures(buffer.text(), &mut caps);

            let Some(full) = caps.get_match() else {
                break;
            };
            // group 1 always participates when the whole pattern matched
            let Some(inner) = caps.get_group(1) else {
                break;
            };

            let (full, inner) = (full.range(), inner.range());

            log::trace!(
                "{:?}..{:?} collapsing {full:?} keeping {inner:?}",
                self.opening,
                self.closing
            );

            buffer.add_attributes(full.clone(), &self.attributes);
            let content = buffer.substring(inner);
            buffer.replace_range(full, content);

            collapsed += 1;
        }

        collapsed
    }
}

#[derive(Debug)]
pub enum CreationError {
    EmptyTag,
    BadRegex(BuildError),
}

impl fmt::Display for CreationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CreationError::EmptyTag => {
                write!(f, "opening and closing tags must not be empty")
            }
            CreationError::BadRegex(err) => {
                let mut msg = err.to_string();
                if let Some(syntax_msg) = err.syntax_error() {
                    msg = format!("msg: {syntax_msg}");
                }

                write!(f, "tag regex failed: {msg}")
            }
        }
    }
}

impl Error for CreationError {}
