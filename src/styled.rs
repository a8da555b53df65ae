use std::{fmt, ops::Range};

use crate::attributes::Attributes;

/// Range of text sharing one set of attributes
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Run {
    pub range: Range<usize>,
    pub attributes: Attributes,
}

impl Run {
    fn new(range: Range<usize>, attributes: Attributes) -> Self {
        Self { range, attributes }
    }
}

/// Text with style attributes attached to byte ranges
///
/// Runs are sorted, never empty, never overlap and cover the entire text. Neighbouring runs always
/// have different attributes.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StyledText {
    text: String,
    runs: Vec<Run>,
}

impl StyledText {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text without any attributes
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let runs = if text.is_empty() {
            Vec::new()
        } else {
            vec![Run::new(0..text.len(), Attributes::new())]
        };

        Self { text, runs }
    }

    /// Text with the same attributes on every character
    pub fn styled(text: impl Into<String>, attributes: Attributes) -> Self {
        let mut styled = Self::plain(text);
        if let Some(run) = styled.runs.first_mut() {
            run.attributes = attributes;
        }

        styled
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// All runs including unstyled ones
    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    /// Runs that carry at least one attribute
    pub fn spans(&self) -> impl Iterator<Item = &Run> {
        self.runs.iter().filter(|run| !run.attributes.is_empty())
    }

    /// Attributes of the character starting at byte offset
    pub fn attributes_at(&self, offset: usize) -> Option<&Attributes> {
        let i = self.run_index(offset)?;

        Some(&self.runs[i].attributes)
    }

    /// Merges attributes into every run inside range. Existing values for the same keys are
    /// overwritten, other keys stay
    ///
    /// # Panics
    ///
    /// If range is out of bounds or does not lie on char boundaries
    pub fn add_attributes(&mut self, range: Range<usize>, attributes: &Attributes) {
        self.check_range(&range);

        if range.is_empty() || attributes.is_empty() {
            return;
        }

        let first = self.split_at(range.start);
        let last = self.split_at(range.end);

        for run in &mut self.runs[first..last] {
            run.attributes.merge(attributes);
        }

        self.coalesce();
    }

    /// Copies part of text with its attributes. Resulting offsets start at 0
    ///
    /// # Panics
    ///
    /// If range is out of bounds or does not lie on char boundaries
    #[must_use]
    pub fn substring(&self, range: Range<usize>) -> Self {
        self.check_range(&range);

        let runs = self
            .runs
            .iter()
            .filter(|run| run.range.start < range.end && range.start < run.range.end)
            .map(|run| {
                Run::new(
                    run.range.start.max(range.start) - range.start
                        ..run.range.end.min(range.end) - range.start,
                    run.attributes.clone(),
                )
            })
            .filter(|run| !run.range.is_empty())
            .collect();

        Self {
            text: self.text[range].to_owned(),
            runs,
        }
    }

    /// Replaces range with other text, keeping attributes of replacement
    ///
    /// # Panics
    ///
    /// If range is out of bounds or does not lie on char boundaries
    pub fn replace_range(&mut self, range: Range<usize>, replacement: StyledText) {
        self.check_range(&range);

        let first = self.split_at(range.start);
        let last = self.split_at(range.end);

        let removed = range.len();
        let added = replacement.len();

        for run in &mut self.runs[last..] {
            run.range.start = run.range.start - removed + added;
            run.range.end = run.range.end - removed + added;
        }

        let inserted = replacement.runs.into_iter().map(|run| {
            Run::new(
                run.range.start + range.start..run.range.end + range.start,
                run.attributes,
            )
        });

        self.runs.splice(first..last, inserted);
        self.text.replace_range(range, &replacement.text);

        self.coalesce();
    }

    pub fn push_str(&mut self, text: &str) {
        self.push_styled(StyledText::plain(text));
    }

    pub fn push_styled(&mut self, other: StyledText) {
        let end = self.len();
        self.replace_range(end..end, other);
    }

    fn check_range(&self, range: &Range<usize>) {
        assert!(
            range.start <= range.end
                && self.text.is_char_boundary(range.start)
                && self.text.is_char_boundary(range.end),
            "range {range:?} is not valid for text of length {}",
            self.text.len()
        );
    }

    fn run_index(&self, offset: usize) -> Option<usize> {
        if offset >= self.text.len() {
            return None;
        }

        match self
            .runs
            .binary_search_by(|run| run.range.start.cmp(&offset))
        {
            Ok(i) => Some(i),
            Err(i) => Some(i - 1),
        }
    }

    /// Makes sure a run starts at offset and returns its index. Returns runs length for offset at
    /// the end of text
    fn split_at(&mut self, offset: usize) -> usize {
        let Some(i) = self.run_index(offset) else {
            return self.runs.len();
        };

        let run = &mut self.runs[i];
        if run.range.start == offset {
            return i;
        }

        let tail = Run::new(offset..run.range.end, run.attributes.clone());
        run.range.end = offset;
        self.runs.insert(i + 1, tail);

        i + 1
    }

    fn coalesce(&mut self) {
        self.runs.retain(|run| !run.range.is_empty());
        self.runs.dedup_by(|next, prev| {
            if prev.attributes == next.attributes {
                prev.range.end = next.range.end;
                true
            } else {
                false
            }
        });
    }
}

impl From<&str> for StyledText {
    fn from(text: &str) -> Self {
        Self::plain(text)
    }
}

impl From<String> for StyledText {
    fn from(text: String) -> Self {
        Self::plain(text)
    }
}

impl fmt::Display for StyledText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{StyleKey, StyleValue};

    fn bold() -> Attributes {
        Attributes::new().with(StyleKey::Bold, true)
    }

    fn italic() -> Attributes {
        Attributes::new().with(StyleKey::Italic, true)
    }

    fn ranges(text: &StyledText) -> Vec<Range<usize>> {
        text.runs().iter().map(|run| run.range.clone()).collect()
    }

    #[test]
    fn plain_has_single_run() {
        let text = StyledText::plain("hello");

        assert_eq!(ranges(&text), vec![0..5]);
        assert_eq!(text.spans().count(), 0);
    }

    #[test]
    fn empty_has_no_runs() {
        assert!(StyledText::plain("").runs().is_empty());
        assert!(StyledText::new().is_empty());
    }

    #[test]
    fn add_attributes_splits_runs() {
        let mut text = StyledText::plain("hello world");
        text.add_attributes(6..11, &bold());

        assert_eq!(ranges(&text), vec![0..6, 6..11]);
        assert_eq!(text.attributes_at(5), Some(&Attributes::new()));
        assert_eq!(text.attributes_at(6), Some(&bold()));
        assert_eq!(text.attributes_at(11), None);
    }

    #[test]
    fn add_attributes_merges_overlapping() {
        let mut text = StyledText::plain("abcdef");
        text.add_attributes(0..4, &bold());
        text.add_attributes(2..6, &italic());

        let mut both = bold();
        both.merge(&italic());

        assert_eq!(ranges(&text), vec![0..2, 2..4, 4..6]);
        assert_eq!(text.runs()[0].attributes, bold());
        assert_eq!(text.runs()[1].attributes, both);
        assert_eq!(text.runs()[2].attributes, italic());
    }

    #[test]
    fn add_attributes_overwrites_same_key() {
        let mut text = StyledText::styled("abc", Attributes::new().with(StyleKey::Bold, false));
        text.add_attributes(0..3, &bold());

        assert_eq!(
            text.attributes_at(1).and_then(|a| a.get(&StyleKey::Bold)),
            Some(&StyleValue::Bool(true))
        );
    }

    #[test]
    fn equal_neighbours_coalesce() {
        let mut text = StyledText::plain("abcdef");
        text.add_attributes(0..2, &bold());
        text.add_attributes(2..4, &bold());

        assert_eq!(ranges(&text), vec![0..4, 4..6]);
    }

    #[test]
    fn empty_range_is_noop() {
        let mut text = StyledText::plain("abc");
        text.add_attributes(1..1, &bold());

        assert_eq!(text, StyledText::plain("abc"));
    }

    #[test]
    fn substring_keeps_attributes() {
        let mut text = StyledText::plain("hello world");
        text.add_attributes(4..7, &bold());

        let sub = text.substring(2..9);

        assert_eq!(sub.text(), "llo wor");
        assert_eq!(ranges(&sub), vec![0..2, 2..5, 5..7]);
        assert_eq!(sub.runs()[1].attributes, bold());
    }

    #[test]
    fn empty_substring_has_no_runs() {
        let mut text = StyledText::plain("abc");
        text.add_attributes(0..3, &bold());

        assert_eq!(text.substring(1..1), StyledText::new());
        assert_eq!(text.substring(3..3), StyledText::new());
        assert!(StyledText::plain("abc").substring(1..1).runs().is_empty());
    }

    #[test]
    fn replace_range_shifts_following_runs() {
        let mut text = StyledText::plain("ab[cd]ef");
        text.add_attributes(6..8, &italic());

        let inner = text.substring(3..5);
        text.replace_range(2..6, inner);

        assert_eq!(text.text(), "abcdef");
        assert_eq!(ranges(&text), vec![0..4, 4..6]);
        assert_eq!(text.runs()[1].attributes, italic());
    }

    #[test]
    fn replace_range_inserts_styled() {
        let mut text = StyledText::plain("a  b");
        text.replace_range(1..3, StyledText::styled("XYZ", bold()));

        assert_eq!(text.text(), "aXYZb");
        assert_eq!(ranges(&text), vec![0..1, 1..4, 4..5]);
        assert_eq!(text.attributes_at(2), Some(&bold()));
    }

    #[test]
    fn replace_everything_with_nothing() {
        let mut text = StyledText::styled("abc", bold());
        text.replace_range(0..3, StyledText::new());

        assert!(text.is_empty());
        assert!(text.runs().is_empty());
    }

    #[test]
    fn push_appends() {
        let mut text = StyledText::plain("ab");
        text.push_styled(StyledText::styled("cd", bold()));
        text.push_str("ef");

        assert_eq!(text.text(), "abcdef");
        assert_eq!(ranges(&text), vec![0..2, 2..4, 4..6]);
    }

    #[test]
    fn multibyte_offsets() {
        let mut text = StyledText::plain("привет мир");
        // "мир" starts after 6 two byte letters and a space
        text.add_attributes(13..19, &bold());

        assert_eq!(text.substring(13..19).text(), "мир");
        assert_eq!(text.spans().next().map(|run| run.range.clone()), Some(13..19));
    }

    #[test]
    #[should_panic]
    fn inside_char_panics() {
        StyledText::plain("привет").add_attributes(1..2, &bold());
    }
}
