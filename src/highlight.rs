//! Locates keyword occurrences in free text and splits it into plain and
//! keyword segments for visual annotation.

use crate::matching::MatchClass;
use log::{debug, warn};
use regex::Regex;
use serde::Serialize;
use std::collections::HashSet;

/// A contiguous slice of the highlighted text.
///
/// Concatenating the `text` of every segment, in order, gives back the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HighlightSegment<'a> {
    pub text: &'a str,
    pub is_keyword: bool,
    pub match_class: Option<MatchClass>,
}

impl<'a> HighlightSegment<'a> {
    pub fn plain(text: &'a str) -> Self {
        Self {
            text,
            is_keyword: false,
            match_class: None,
        }
    }

    pub fn keyword(text: &'a str, class: MatchClass) -> Self {
        Self {
            text,
            is_keyword: true,
            match_class: Some(class),
        }
    }
}

/// Compiled whole-word, case-insensitive matcher for a set of keywords.
///
/// Build once and reuse it for every render of the same keyword set.
#[derive(Debug, Clone)]
pub struct Highlighter {
    pattern: Option<Regex>,
}

impl Highlighter {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let mut keywords: Vec<String> = keywords
            .into_iter()
            .map(|keyword| keyword.as_ref().to_lowercase())
            // An empty branch would match at every word boundary.
            .filter(|keyword| !keyword.trim().is_empty())
            .filter(|keyword| seen.insert(keyword.clone()))
            .collect();

        // Alternation is leftmost-first, so "node" listed before "node.js"
        // would claim the front of every "Node.js".
        keywords.sort_by(|a, b| b.len().cmp(&a.len()));
        let branches: Vec<String> = keywords.iter().map(|keyword| regex::escape(keyword)).collect();

        if branches.is_empty() {
            return Self { pattern: None };
        }

        // ASCII word boundaries: the tokenizer splits on every non-ASCII
        // letter, so "caf" out of "café" must still be found there.
        let source = format!(r"(?i)(?-u:\b)(?:{})(?-u:\b)", branches.join("|"));
        let pattern = match Regex::new(&source) {
            Ok(pattern) => {
                debug!("Built highlight pattern over {} keywords", branches.len());
                Some(pattern)
            }
            Err(e) => {
                warn!("Highlighting disabled, could not build keyword pattern: {}", e);
                None
            }
        };

        Self { pattern }
    }

    /// True when at least one usable keyword was supplied and the pattern
    /// compiled.
    pub fn is_active(&self) -> bool {
        self.pattern.is_some()
    }

    /// Split `text` into alternating plain and keyword segments. `classify`
    /// receives each occurrence verbatim (original casing).
    pub fn segments<'a, F>(&self, text: &'a str, classify: F) -> Vec<HighlightSegment<'a>>
    where
        F: Fn(&str) -> MatchClass,
    {
        let pattern = match &self.pattern {
            Some(pattern) if !text.is_empty() => pattern,
            _ => return vec![HighlightSegment::plain(text)],
        };

        let mut segments = Vec::new();
        let mut cursor = 0;

        for occurrence in pattern.find_iter(text) {
            if occurrence.start() > cursor {
                segments.push(HighlightSegment::plain(&text[cursor..occurrence.start()]));
            }
            segments.push(HighlightSegment::keyword(
                occurrence.as_str(),
                classify(occurrence.as_str()),
            ));
            cursor = occurrence.end();
        }

        if cursor < text.len() || segments.is_empty() {
            segments.push(HighlightSegment::plain(&text[cursor..]));
        }

        segments
    }
}

/// One-shot highlighting of `text` with `keywords`.
pub fn highlight<'a, I, S, F>(text: &'a str, keywords: I, classify: F) -> Vec<HighlightSegment<'a>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
    F: Fn(&str) -> MatchClass,
{
    Highlighter::new(keywords).segments(text, classify)
}
