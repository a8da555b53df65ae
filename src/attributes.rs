use std::{
    collections::{btree_map, BTreeMap},
    convert::Infallible,
    error::Error,
    fmt,
    str::FromStr,
};

/// Name of a style attribute
///
/// Well known keys have their own variants, anything else is kept as [`StyleKey::Custom`]. Textual
/// form is lowercase with dashes: `"bold"`, `"font-size"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "String", into = "String")
)]
pub enum StyleKey {
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
    Foreground,
    Background,
    Font,
    FontSize,
    Link,
    Custom(String),
}

impl StyleKey {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Bold => "bold",
            Self::Italic => "italic",
            Self::Underline => "underline",
            Self::Strikethrough => "strikethrough",
            Self::Code => "code",
            Self::Foreground => "foreground",
            Self::Background => "background",
            Self::Font => "font",
            Self::FontSize => "font-size",
            Self::Link => "link",
            Self::Custom(name) => name,
        }
    }
}

impl From<&str> for StyleKey {
    fn from(name: &str) -> Self {
        match name {
            "bold" => Self::Bold,
            "italic" => Self::Italic,
            "underline" => Self::Underline,
            "strikethrough" => Self::Strikethrough,
            "code" => Self::Code,
            "foreground" => Self::Foreground,
            "background" => Self::Background,
            "font" => Self::Font,
            "font-size" => Self::FontSize,
            "link" => Self::Link,
            _ => Self::Custom(name.to_owned()),
        }
    }
}

impl From<String> for StyleKey {
    fn from(name: String) -> Self {
        match Self::from(name.as_str()) {
            // reuse allocation
            Self::Custom(_) => Self::Custom(name),
            known => known,
        }
    }
}

impl From<StyleKey> for String {
    fn from(key: StyleKey) -> Self {
        match key {
            StyleKey::Custom(name) => name,
            known => known.as_str().to_owned(),
        }
    }
}

impl FromStr for StyleKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl fmt::Display for StyleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, PartialEq)]
pub enum ColorParseError {
    MissingHash,
    BadLength(usize),
    BadDigit(char),
}

impl fmt::Display for ColorParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingHash => write!(f, "color must start with '#'"),
            Self::BadLength(len) => {
                write!(f, "expected 3 or 6 hex digits, got {len}")
            }
            Self::BadDigit(c) => write!(f, "'{c}' is not a hex digit"),
        }
    }
}

impl Error for ColorParseError {}

/// 8 bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(pub u8, pub u8, pub u8);

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self(r, g, b)
    }

    fn hex_digit(c: char) -> Result<u8, ColorParseError> {
        c.to_digit(16)
            .map(|d| d as u8)
            .ok_or(ColorParseError::BadDigit(c))
    }
}

impl FromStr for Color {
    type Err = ColorParseError;

    /// Parses `#rgb` and `#rrggbb`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').ok_or(ColorParseError::MissingHash)?;

        let digits = hex
            .chars()
            .map(Self::hex_digit)
            .collect::<Result<Vec<_>, _>>()?;

        match digits[..] {
            [r, g, b] => Ok(Self(r * 17, g * 17, b * 17)),
            [r1, r2, g1, g2, b1, b2] => Ok(Self(r1 << 4 | r2, g1 << 4 | g2, b1 << 4 | b2)),
            _ => Err(ColorParseError::BadLength(digits.len())),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Value of a style attribute
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StyleValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Color(Color),
}

impl From<bool> for StyleValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for StyleValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for StyleValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<Color> for StyleValue {
    fn from(value: Color) -> Self {
        Self::Color(value)
    }
}

/// Set of style attributes attached to a piece of text
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Attributes(BTreeMap<StyleKey, StyleValue>);

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder style insert
    #[must_use]
    pub fn with(mut self, key: impl Into<StyleKey>, value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(
        &mut self,
        key: impl Into<StyleKey>,
        value: impl Into<StyleValue>,
    ) -> Option<StyleValue> {
        self.0.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &StyleKey) -> Option<&StyleValue> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &StyleKey) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, StyleKey, StyleValue> {
        self.0.iter()
    }

    /// Adds all entries from other, overwriting values of existing keys
    pub fn merge(&mut self, other: &Attributes) {
        for (key, value) in &other.0 {
            self.0.insert(key.clone(), value.clone());
        }
    }
}

impl<K: Into<StyleKey>, V: Into<StyleValue>> FromIterator<(K, V)> for Attributes {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

impl<K: Into<StyleKey>, V: Into<StyleValue>, const N: usize> From<[(K, V); N]> for Attributes {
    fn from(entries: [(K, V); N]) -> Self {
        entries.into_iter().collect()
    }
}

impl<'a> IntoIterator for &'a Attributes {
    type Item = (&'a StyleKey, &'a StyleValue);
    type IntoIter = btree_map::Iter<'a, StyleKey, StyleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
