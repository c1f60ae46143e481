//! Report structures produced by an analysis run

use crate::highlight::HighlightSegment;
use crate::keywords::KeywordSet;
use crate::matching::{MatchResult, ScoreSummary};
use crate::suggestions::Suggestion;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Everything known about one resume / job description comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub metadata: ReportMetadata,

    /// Keywords extracted from the resume, first-occurrence order
    pub resume_keywords: KeywordSet,

    /// Keywords extracted from the job description, first-occurrence order
    pub job_keywords: KeywordSet,

    pub match_result: MatchResult,

    pub score: ScoreSummary,

    /// Validated placement suggestions for missing keywords
    pub suggestions: Vec<Suggestion>,

    /// User-facing message when the suggester was asked and failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion_error: Option<String>,

    /// Resume text the keywords were extracted from, kept for highlighting
    pub resume_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the report was generated
    pub generated_at: DateTime<Utc>,

    /// Version of the optimizer used
    pub optimizer_version: String,

    /// Resume file analyzed, when the text came from a file
    pub resume_file: Option<String>,

    /// Job description file analyzed, when the text came from a file
    pub job_file: Option<String>,

    /// Total processing time
    pub processing_time_ms: u64,

    /// Suggester model consulted, if any
    pub suggester_model: Option<String>,
}

impl ReportMetadata {
    pub fn new(processing_time_ms: u64, suggester_model: Option<String>) -> Self {
        Self {
            generated_at: Utc::now(),
            optimizer_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_file: None,
            job_file: None,
            processing_time_ms,
            suggester_model,
        }
    }
}

impl AnalysisReport {
    /// Record the source files of the analyzed texts.
    pub fn with_files(mut self, resume_file: impl Into<String>, job_file: impl Into<String>) -> Self {
        self.metadata.resume_file = Some(resume_file.into());
        self.metadata.job_file = Some(job_file.into());
        self
    }

    /// Resume text split into plain and keyword segments, each keyword
    /// occurrence classified as matched or missing.
    pub fn highlighted_resume(&self) -> Vec<HighlightSegment<'_>> {
        self.match_result.highlight(&self.resume_text)
    }

    pub fn has_suggestions(&self) -> bool {
        !self.suggestions.is_empty()
    }
}
