//! Tag-delimited markup to styled text using regex.
//!
//! # Table of contents
//! * [Description](#description)
//! * [Rules](#rules)
//! * [Styled text](#styled-text)
//! * [Definitions](#definitions)
//! * [CLI tool](#cli-tool)
//! * [Feature flags](#feature-flags)
//!
//! # Description
//!
//! Turns text like `*bold*` or `_italic_` into [`StyledText`]: delimiters are stripped and the
//! content between them gets style [`Attributes`]. Each [`Rule`] is a pair of delimiters plus
//! attributes. [`MarkupEngine`] runs rules in order.
//!
//! # Rules
//!
//! Delimiters are matched literally, regex metacharacters in them are escaped. Content between
//! them is matched lazily and may span multiple lines. Engine does the following for each rule:
//!
//! * finds leftmost match in current text
//! * merges rule attributes into the whole match, overwriting existing values of the same keys
//! * replaces match with its content, keeping whatever attributes content already had
//! * repeats until rule no longer matches, then moves to the next rule
//!
//! Unbalanced delimiters are left as is. Nesting the same delimiter is not supported: `*a *b* c*`
//! pairs up first two stars, then the last two.
//!
//! ```rust
//! use markupkit::{Attributes, MarkupEngine, Rule, StyleKey, StyleValue};
//!
//! let engine = MarkupEngine::new(vec![
//!     Rule::new("*", "*", Attributes::new().with(StyleKey::Bold, true)).unwrap(),
//!     Rule::new("_", "_", Attributes::new().with(StyleKey::Italic, true)).unwrap(),
//! ]);
//!
//! let styled = engine.apply_markup("*a* and _b_");
//! assert_eq!(styled.text(), "a and b");
//!
//! let bold = styled.attributes_at(0).unwrap();
//! assert_eq!(bold.get(&StyleKey::Bold), Some(&StyleValue::Bool(true)));
//! ```
//!
//! There are two shared presets: [`MarkupEngine::markdown`] and [`MarkupEngine::markleft`].
//!
//! # Styled text
//!
//! [`StyledText`] is a string with attribute runs. Offsets are in bytes. Already styled text can
//! be passed to [`MarkupEngine::apply_markup_to`], attributes of content survive.
//!
//! # Definitions
//!
//! With `serde` feature rules and engines can be deserialized. Engine can extend one of presets,
//! rules with the same delimiters are replaced and new ones are appended:
//!
//! ```rust
//! # #[cfg(feature = "serde")]
//! # {
//! use markupkit::MarkupEngine;
//!
//! let engine = serde_json::from_str::<MarkupEngine>(
//!     r#"{
//!         "extends": "markdown",
//!         "rules": [
//!             {"opening": "++", "closing": "++", "attributes": {"underline": {"Bool": true}}}
//!         ]
//!     }"#,
//! )
//! .expect("engine did not parse");
//!
//! assert_eq!(engine.apply_markup("++u++ **b**").text(), "u b");
//! # }
//! ```
//!
//! See `demos` folder for RON definitions.
//!
//! # CLI tool
//!
//! You can run CLI tool by enabling `cli` feature: `cargo run --features=cli -- --help`.
//!
//! `echo '*hello*' | cargo run --features=cli -- -p markleft --format ron` prints styled runs.
//!
//! # Feature flags
//!
//! Name | Description | Default?
//! ---|---|---
//! `serde` | enables (de)serialization of rules, engines and styled text | yes
//! `cli` | required to run CLI tool | no

mod attributes;
mod engine;
mod rule;
mod styled;

#[cfg(feature = "serde")]
mod deserialize;

pub use attributes::{Attributes, Color, ColorParseError, StyleKey, StyleValue};
pub use engine::MarkupEngine;
pub use rule::{CreationError, Rule};
pub use styled::{Run, StyledText};
