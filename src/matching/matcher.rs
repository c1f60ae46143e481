//! Set-based comparison of resume keywords against job description keywords

use crate::highlight::{HighlightSegment, Highlighter};
use crate::keywords::{extract_keywords, KeywordSet};
use log::debug;
use serde::{Deserialize, Serialize};

/// Display category of a highlighted keyword occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchClass {
    Matched,
    Missing,
}

impl std::fmt::Display for MatchClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchClass::Matched => write!(f, "matched"),
            MatchClass::Missing => write!(f, "missing"),
        }
    }
}

/// Outcome of one resume/job description comparison.
///
/// `matched_keywords` and `missing_keywords` partition the job description
/// keywords and keep their order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub matched_keywords: KeywordSet,
    pub missing_keywords: KeywordSet,
    /// Percentage in `[0, 100]`, unrounded.
    pub match_score: f64,
}

impl MatchResult {
    /// Number of job description keywords the result was computed over.
    pub fn job_keyword_count(&self) -> usize {
        self.matched_keywords.len() + self.missing_keywords.len()
    }

    pub fn classify(&self, keyword: &str) -> MatchClass {
        if self.matched_keywords.contains(keyword) {
            MatchClass::Matched
        } else {
            MatchClass::Missing
        }
    }

    /// Union of matched and missing keywords, matched first.
    pub fn highlight_keywords(&self) -> KeywordSet {
        self.matched_keywords
            .iter()
            .chain(self.missing_keywords.iter())
            .cloned()
            .collect()
    }

    /// Split `text` into segments tagged with this result's classification.
    pub fn highlight<'a>(&self, text: &'a str) -> Vec<HighlightSegment<'a>> {
        let highlighter = Highlighter::new(self.highlight_keywords().iter());
        if !highlighter.is_active() {
            debug!("No keywords to highlight, returning text unchanged");
        }
        highlighter.segments(text, |keyword| self.classify(keyword))
    }
}

/// Partition `job_keywords` into those present in `resume_keywords` and those
/// absent, comparing case-insensitively.
pub fn match_keywords(resume_keywords: &KeywordSet, job_keywords: &KeywordSet) -> MatchResult {
    let (matched, missing): (Vec<&String>, Vec<&String>) = job_keywords
        .iter()
        .partition(|keyword| resume_keywords.contains(keyword));

    let match_score = if job_keywords.is_empty() {
        0.0
    } else {
        matched.len() as f64 / job_keywords.len() as f64 * 100.0
    };

    debug!(
        "Matched {} of {} job keywords ({:.1}%)",
        matched.len(),
        job_keywords.len(),
        match_score
    );

    MatchResult {
        matched_keywords: matched.into_iter().cloned().collect(),
        missing_keywords: missing.into_iter().cloned().collect(),
        match_score,
    }
}

/// Extract keywords from both texts and match them.
pub fn match_texts(resume_text: &str, job_text: &str) -> MatchResult {
    match_keywords(&extract_keywords(resume_text), &extract_keywords(job_text))
}
