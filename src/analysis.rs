//! Analysis engine: keyword extraction, matching, scoring and optional
//! placement suggestions for one resume / job description pair.

use crate::config::Config;
use crate::error::{AtsOptimizerError, Result};
use crate::keywords::extract_keywords;
use crate::matching::{match_keywords, ScoreSummary, ScoreThresholds};
use crate::output::report::{AnalysisReport, ReportMetadata};
use crate::suggestions::{request_suggestions, KeywordSuggester, SuggestionRequest};
use log::{debug, info};
use std::time::Instant;

pub struct AnalysisEngine {
    thresholds: ScoreThresholds,
}

impl AnalysisEngine {
    pub fn new(config: &Config) -> Self {
        Self {
            thresholds: config.scoring,
        }
    }

    /// Keyword analysis only. Fails only when either input is blank.
    pub fn analyze(&self, resume_text: &str, job_text: &str) -> Result<AnalysisReport> {
        let start_time = Instant::now();
        validate_inputs(resume_text, job_text)?;

        let resume_keywords = extract_keywords(resume_text);
        let job_keywords = extract_keywords(job_text);
        debug!(
            "Extracted {} resume keywords and {} job keywords",
            resume_keywords.len(),
            job_keywords.len()
        );

        let match_result = match_keywords(&resume_keywords, &job_keywords);
        let score = ScoreSummary::new(match_result.match_score, &self.thresholds);

        info!(
            "Keyword match: {}% ({} matched, {} missing)",
            score.percentage,
            match_result.matched_keywords.len(),
            match_result.missing_keywords.len()
        );

        Ok(AnalysisReport {
            metadata: ReportMetadata::new(start_time.elapsed().as_millis() as u64, None),
            resume_keywords,
            job_keywords,
            match_result,
            score,
            suggestions: Vec::new(),
            suggestion_error: None,
            resume_text: resume_text.to_string(),
        })
    }

    /// Keyword analysis followed by a suggester call for the missing keywords.
    ///
    /// A suggester failure does not fail the analysis: the report keeps its
    /// keyword results and carries the user-facing error instead.
    pub async fn analyze_with_suggestions<S: KeywordSuggester>(
        &self,
        resume_text: &str,
        job_text: &str,
        suggester: &S,
    ) -> Result<AnalysisReport> {
        let start_time = Instant::now();
        let mut report = self.analyze(resume_text, job_text)?;

        let request = SuggestionRequest {
            resume_text: resume_text.to_string(),
            job_description_text: job_text.to_string(),
            missing_keywords: report.match_result.missing_keywords.as_slice().to_vec(),
        };

        match request_suggestions(suggester, &request).await {
            Ok(suggestions) => report.suggestions = suggestions,
            Err(e) => report.suggestion_error = Some(e.to_string()),
        }

        report.metadata.suggester_model = Some(suggester.model_name().to_string());
        report.metadata.processing_time_ms = start_time.elapsed().as_millis() as u64;

        Ok(report)
    }
}

fn validate_inputs(resume_text: &str, job_text: &str) -> Result<()> {
    if resume_text.trim().is_empty() {
        return Err(AtsOptimizerError::InvalidInput(
            "Resume content cannot be empty.".to_string(),
        ));
    }
    if job_text.trim().is_empty() {
        return Err(AtsOptimizerError::InvalidInput(
            "Job description content cannot be empty.".to_string(),
        ));
    }
    Ok(())
}
