use std::fs;

use markupkit::{MarkupEngine, StyledText};

/// Read sample text into string
pub fn read_sample_file() -> String {
    fs::read_to_string("tests/sample_text.txt").unwrap()
}

/// Read sample text lines and filter junk
pub fn read_sample_file_lines() -> Vec<String> {
    read_sample_file()
        .lines()
        .filter(|&l| !(l.is_empty() || l.eq(" :")))
        .map(|s| s.to_owned())
        .collect()
}

/// Output can only shrink and runs cover all of it. For the shipped definitions and sample text no
/// rule has anything left to collapse either. That does not hold in general: a later rule can glue
/// together delimiters of an earlier one
pub fn check_output(engine: &MarkupEngine, input: &str, output: &StyledText) {
    assert!(output.len() <= input.len(), "{input:?} grew into {output:?}");

    let covered: usize = output.runs().iter().map(|run| run.range.len()).sum();
    assert_eq!(covered, output.len(), "runs do not cover {output:?}");

    for rule in engine.rules() {
        assert!(
            !rule.is_match(output.text()),
            "{rule:?} still matches {:?}",
            output.text()
        );
    }

    assert_eq!(&engine.apply_markup_to(output), output);
}
