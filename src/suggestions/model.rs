//! Data exchanged with the keyword placement suggester.
//!
//! Responses are accepted loosely ([`LenientSuggestionResponse`]) and only
//! well-formed entries are handed to the rest of the application as
//! [`Suggestion`]s.

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Input for the suggester.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SuggestionRequest {
    pub resume_text: String,
    pub job_description_text: String,
    pub missing_keywords: Vec<String>,
}

/// A validated placement suggestion: both fields are non-blank.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Suggestion {
    pub keyword: String,
    pub placement_suggestion: String,
}

/// Raw suggester output. The array may be absent, and entries may have
/// missing, empty or mistyped fields, or extra fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LenientSuggestionResponse {
    #[serde(default)]
    pub suggestions: Option<Value>,
}

impl LenientSuggestionResponse {
    pub fn from_entries(entries: Vec<Value>) -> Self {
        Self {
            suggestions: Some(Value::Array(entries)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LenientSuggestion {
    #[serde(default)]
    keyword: Option<String>,
    #[serde(default, alias = "placement_suggestion")]
    placement_suggestion: Option<String>,
}

/// Keep only entries whose `keyword` and `placementSuggestion` are strings
/// that are non-empty after trimming. Accepted values are kept verbatim.
pub fn validate_suggestions(response: LenientSuggestionResponse) -> Vec<Suggestion> {
    let entries = match response.suggestions {
        Some(Value::Array(entries)) => entries,
        Some(other) => {
            warn!("Ignoring suggester output: `suggestions` is not an array ({})", other);
            return Vec::new();
        }
        None => {
            debug!("Suggester output has no `suggestions` array");
            return Vec::new();
        }
    };

    let total = entries.len();
    let suggestions: Vec<Suggestion> = entries
        .into_iter()
        .filter_map(|entry| match serde_json::from_value::<LenientSuggestion>(entry) {
            Ok(LenientSuggestion {
                keyword: Some(keyword),
                placement_suggestion: Some(placement_suggestion),
            }) if !keyword.trim().is_empty() && !placement_suggestion.trim().is_empty() => Some(Suggestion {
                keyword,
                placement_suggestion,
            }),
            _ => None,
        })
        .collect();

    if suggestions.len() < total {
        warn!(
            "Dropped {} malformed suggestion(s) out of {}",
            total - suggestions.len(),
            total
        );
    }

    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_valid_entries_kept_verbatim() {
        let response = LenientSuggestionResponse::from_entries(vec![json!({
            "keyword": " Docker ",
            "placementSuggestion": "Mention containerizing the billing service.",
            "confidence": 0.9
        })]);
        let suggestions = validate_suggestions(response);
        assert_eq!(
            suggestions,
            vec![Suggestion {
                keyword: " Docker ".to_string(),
                placement_suggestion: "Mention containerizing the billing service.".to_string(),
            }]
        );
    }

    #[test]
    fn test_empty_keyword_dropped() {
        let response = LenientSuggestionResponse::from_entries(vec![
            json!({"keyword": "", "placementSuggestion": "add it"}),
            json!({"keyword": "aws", "placementSuggestion": "   "}),
            json!({"keyword": "gcp"}),
            json!({"placementSuggestion": "somewhere"}),
            json!({"keyword": 42, "placementSuggestion": "number keyword"}),
            json!(null),
            json!("just a string"),
            json!({"keyword": "terraform", "placement_suggestion": "Skills section"}),
        ]);
        let suggestions = validate_suggestions(response);
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].keyword, "terraform");
    }

    #[test]
    fn test_missing_or_malformed_array() {
        assert!(validate_suggestions(LenientSuggestionResponse::default()).is_empty());
        let response = LenientSuggestionResponse {
            suggestions: Some(json!({"keyword": "aws"})),
        };
        assert!(validate_suggestions(response).is_empty());
    }

    #[test]
    fn test_request_serializes_camel_case() {
        let request = SuggestionRequest {
            resume_text: "resume".to_string(),
            job_description_text: "job".to_string(),
            missing_keywords: vec!["aws".to_string()],
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["jobDescriptionText"], "job");
        assert_eq!(value["missingKeywords"][0], "aws");
    }
}
