//! Prompt template for the keyword placement suggester

use crate::suggestions::model::SuggestionRequest;
use lazy_static::lazy_static;
use log::debug;
use regex::{Captures, Regex};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{(resume|job|keywords)\}").expect("Invalid placeholder regex");
}

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub system: String,
    pub keyword_placement: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            system: SYSTEM_PROMPT.to_string(),
            keyword_placement: KEYWORD_PLACEMENT_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    /// Fill the placement template in a single pass, so placeholder-like
    /// text inside the resume or job description is left as written.
    pub fn render_keyword_placement(&self, request: &SuggestionRequest) -> String {
        let keyword_list: String = request
            .missing_keywords
            .iter()
            .map(|keyword| format!("- {}\n", keyword))
            .collect();

        let prompt = PLACEHOLDER
            .replace_all(&self.keyword_placement, |caps: &Captures| match &caps[1] {
                "resume" => request.resume_text.clone(),
                "job" => request.job_description_text.clone(),
                _ => keyword_list.trim_end().to_string(),
            })
            .into_owned();

        debug!(
            "Rendered placement prompt: {} chars, {} missing keywords",
            prompt.len(),
            request.missing_keywords.len()
        );

        prompt
    }
}

const SYSTEM_PROMPT: &str = "You are an expert resume writer specializing in Applicant Tracking System (ATS) optimization. You reply with JSON only.";

const KEYWORD_PLACEMENT_TEMPLATE: &str = r#"TASK: Suggest where each missing keyword should be placed in the resume so it gets past ATS screening.

<RESUME>
{resume}
</RESUME>

<JOB POSTING>
{job}
</JOB POSTING>

<MISSING KEYWORDS>
{keywords}
</MISSING KEYWORDS>

For each missing keyword, give one specific, actionable suggestion. Reference the actual sections, roles or projects in the resume above, not generic advice.

Reply with a JSON object of this shape and nothing else:
{"suggestions": [{"keyword": "<missing keyword>", "placementSuggestion": "<where and how to add it>"}]}

If you cannot suggest a placement for a keyword, leave it out. Never emit an entry with a missing or empty "keyword" or "placementSuggestion"."#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_inputs() {
        let templates = PromptTemplates::default();
        let request = SuggestionRequest {
            resume_text: "Backend engineer at Acme, built Rust services.".to_string(),
            job_description_text: "Looking for AWS and Docker experience.".to_string(),
            missing_keywords: vec!["aws".to_string(), "docker".to_string()],
        };

        let prompt = templates.render_keyword_placement(&request);

        assert!(prompt.contains("Backend engineer at Acme"));
        assert!(prompt.contains("Looking for AWS and Docker"));
        assert!(prompt.contains("- aws\n- docker\n</MISSING KEYWORDS>"));
        assert!(prompt.contains("placementSuggestion"));
        assert!(!prompt.contains("{resume}"));
    }

    #[test]
    fn test_placeholders_in_user_text_stay_literal() {
        let templates = PromptTemplates::default();
        let request = SuggestionRequest {
            resume_text: "Templating with {job} and {keywords} tokens".to_string(),
            job_description_text: "JOB TEXT".to_string(),
            missing_keywords: vec!["jinja".to_string()],
        };

        let prompt = templates.render_keyword_placement(&request);

        assert!(prompt.contains("Templating with {job} and {keywords} tokens"));
        assert_eq!(prompt.matches("JOB TEXT").count(), 1);
        assert_eq!(prompt.matches("- jinja").count(), 1);
    }
}
