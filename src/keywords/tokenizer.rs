//! Keyword extraction: normalizes free text into an ordered set of
//! significant tokens.

use crate::keywords::stop_words::is_stop_word;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

lazy_static! {
    static ref LINE_BREAK_REGEX: Regex =
        Regex::new(r"\r\n|\n|\r").expect("Invalid line break regex");

    /// Everything outside word characters, whitespace and `' . # + -` becomes a
    /// separator, as do quote/underscore pairs and hyphens touching whitespace.
    static ref SEPARATOR_REGEX: Regex =
        Regex::new(r"[^A-Za-z0-9_\s'.#+\-]|'_|_'|\s-\s|-\s|\s-").expect("Invalid separator regex");

    static ref DECIMAL_NUMBER_REGEX: Regex =
        Regex::new(r"^[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:e[+-]?[0-9]+)?$")
            .expect("Invalid decimal number regex");

    static ref RADIX_NUMBER_REGEX: Regex =
        Regex::new(r"^0(?:x[0-9a-f]+|o[0-7]+|b[01]+)$").expect("Invalid radix number regex");
}

/// Minimum length of a keyword, in bytes. Extracted tokens are always ASCII.
pub const MIN_KEYWORD_LENGTH: usize = 2;

/// Ordered collection of keywords, unique under lowercase comparison.
///
/// The first-seen spelling of a keyword is kept for display; lookups through
/// [`KeywordSet::contains`] ignore case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct KeywordSet {
    keywords: Vec<String>,
    lowercase: HashSet<String>,
}

impl KeywordSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a keyword unless an equal one (ignoring case) is already present.
    /// Returns whether the keyword was inserted.
    pub fn insert(&mut self, keyword: impl Into<String>) -> bool {
        let keyword = keyword.into();
        if self.lowercase.insert(keyword.to_lowercase()) {
            self.keywords.push(keyword);
            true
        } else {
            false
        }
    }

    /// Case-insensitive membership test.
    pub fn contains(&self, keyword: &str) -> bool {
        self.lowercase.contains(&keyword.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.keywords.iter()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.keywords
    }

    pub fn into_vec(self) -> Vec<String> {
        self.keywords
    }
}

impl<S: Into<String>> FromIterator<S> for KeywordSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = KeywordSet::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for KeywordSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for keyword in iter {
            self.insert(keyword);
        }
    }
}

impl From<Vec<String>> for KeywordSet {
    fn from(keywords: Vec<String>) -> Self {
        keywords.into_iter().collect()
    }
}

impl From<KeywordSet> for Vec<String> {
    fn from(set: KeywordSet) -> Self {
        set.keywords
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.keywords.iter()
    }
}

impl IntoIterator for KeywordSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.keywords.into_iter()
    }
}

/// Extract the significant keywords of `text`, in first-occurrence order.
///
/// Tokens such as `c++`, `c#` and `node.js` survive as single keywords.
/// Stop words, purely numeric tokens and tokens shorter than two characters
/// are dropped. Never fails; empty input gives an empty set.
pub fn extract_keywords(text: &str) -> KeywordSet {
    if text.is_empty() {
        return KeywordSet::new();
    }

    let lowered = text.to_lowercase();
    let single_line = LINE_BREAK_REGEX.replace_all(&lowered, " ");
    let separated = SEPARATOR_REGEX.replace_all(&single_line, " ");

    separated
        .split_whitespace()
        .filter_map(normalize_token)
        .collect()
}

fn normalize_token(raw: &str) -> Option<&str> {
    let token = raw.trim_matches(is_edge_char);

    // Abbreviations like "e.g." are listed with their periods.
    if is_stop_word(token) {
        return None;
    }

    // Trailing periods are sentence punctuation ("runs." -> "runs").
    let token = token.trim_end_matches(|c| c == '.' || is_edge_char(c));

    if token.len() < MIN_KEYWORD_LENGTH || is_stop_word(token) || is_numeric_token(token) {
        return None;
    }

    Some(token)
}

fn is_edge_char(c: char) -> bool {
    matches!(c, '\'' | '"' | '-')
}

/// True when a lowercase token reads as a number: signed integers and
/// decimals (with optional exponent) or `0x`/`0o`/`0b` literals.
pub fn is_numeric_token(token: &str) -> bool {
    DECIMAL_NUMBER_REGEX.is_match(token) || RADIX_NUMBER_REGEX.is_match(token)
}
