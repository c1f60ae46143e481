//! Keyword placement suggester: the collaborator seam and its HTTP implementation.

use crate::config::SuggestionsConfig;
use crate::error::{AtsOptimizerError, Result};
use crate::suggestions::model::{validate_suggestions, LenientSuggestionResponse, Suggestion, SuggestionRequest};
use crate::suggestions::prompts::PromptTemplates;
use log::{debug, info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SuggestionError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Suggester returned empty content")]
    EmptyContent,

    #[error("{0}")]
    Unavailable(String),
}

/// Anything that can propose where missing keywords belong in a resume.
pub trait KeywordSuggester {
    fn suggest(
        &self,
        request: &SuggestionRequest,
    ) -> impl Future<Output = std::result::Result<LenientSuggestionResponse, SuggestionError>> + Send;

    /// Identifier recorded in report metadata.
    fn model_name(&self) -> &str;
}

/// Ask `suggester` for placements of the request's missing keywords.
///
/// No call is made when nothing is missing. Any suggester failure becomes
/// the generic user-facing suggestion error; details go to the log.
pub async fn request_suggestions<S: KeywordSuggester>(
    suggester: &S,
    request: &SuggestionRequest,
) -> Result<Vec<Suggestion>> {
    if request.missing_keywords.is_empty() {
        debug!("No missing keywords, skipping suggester");
        return Ok(Vec::new());
    }

    info!(
        "Requesting placement suggestions for {} missing keywords from {}",
        request.missing_keywords.len(),
        suggester.model_name()
    );

    match suggester.suggest(request).await {
        Ok(response) => {
            let suggestions = validate_suggestions(response);
            debug!("Accepted {} suggestions", suggestions.len());
            Ok(suggestions)
        }
        Err(e) => {
            warn!("Keyword suggester failed: {}", e);
            Err(AtsOptimizerError::suggestion_failure())
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Suggester backed by an OpenAI-compatible chat completions endpoint
/// (Ollama, llama.cpp server, vLLM, hosted APIs).
#[derive(Clone)]
pub struct HttpSuggester {
    client: Client,
    endpoint: String,
    model: String,
    api_key: Option<String>,
    temperature: f32,
    prompts: PromptTemplates,
}

impl HttpSuggester {
    pub fn new(settings: &SuggestionsConfig) -> std::result::Result<Self, SuggestionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        let api_key = settings
            .api_key_env
            .as_deref()
            .and_then(|var| std::env::var(var).ok())
            .filter(|key| !key.trim().is_empty());

        if api_key.is_none() {
            debug!("No API key found, calling {} without authorization", settings.endpoint);
        }

        Ok(Self {
            client,
            endpoint: settings.endpoint.clone(),
            model: settings.model.clone(),
            api_key,
            temperature: settings.temperature,
            prompts: PromptTemplates::default(),
        })
    }
}

impl KeywordSuggester for HttpSuggester {
    async fn suggest(
        &self,
        request: &SuggestionRequest,
    ) -> std::result::Result<LenientSuggestionResponse, SuggestionError> {
        let prompt = self.prompts.render_keyword_placement(request);
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &self.prompts.system,
                },
                ChatMessage {
                    role: "user",
                    content: &prompt,
                },
            ],
            temperature: self.temperature,
            stream: false,
        };

        let mut builder = self.client.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(SuggestionError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response.json().await?;
        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(SuggestionError::EmptyContent)?;

        parse_suggestion_content(&content)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

/// Parse model output into a lenient response. A bare JSON array is treated
/// as the `suggestions` list; any other non-object value yields no suggestions.
pub fn parse_suggestion_content(content: &str) -> std::result::Result<LenientSuggestionResponse, SuggestionError> {
    let value: Value = serde_json::from_str(strip_json_fences(content))?;
    match value {
        Value::Array(_) => Ok(LenientSuggestionResponse {
            suggestions: Some(value),
        }),
        Value::Object(_) => Ok(serde_json::from_value(value)?),
        _ => Ok(LenientSuggestionResponse::default()),
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = match text.strip_prefix("```json").or_else(|| text.strip_prefix("```")) {
        Some(inner) => inner.trim_start(),
        None => return text,
    };
    inner.strip_suffix("```").map(str::trim).unwrap_or(inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct CannedSuggester(std::result::Result<Value, String>);

    impl KeywordSuggester for CannedSuggester {
        async fn suggest(
            &self,
            _request: &SuggestionRequest,
        ) -> std::result::Result<LenientSuggestionResponse, SuggestionError> {
            match &self.0 {
                Ok(value) => Ok(serde_json::from_value(value.clone())?),
                Err(message) => Err(SuggestionError::Unavailable(message.clone())),
            }
        }

        fn model_name(&self) -> &str {
            "canned"
        }
    }

    fn request(missing: &[&str]) -> SuggestionRequest {
        SuggestionRequest {
            resume_text: "Rust engineer".to_string(),
            job_description_text: "Rust and Docker".to_string(),
            missing_keywords: missing.iter().map(|k| k.to_string()).collect(),
        }
    }

    #[test]
    fn test_strip_json_fences() {
        assert_eq!(strip_json_fences("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_json_fences("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(strip_json_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_parse_object_and_bare_array() {
        let response = parse_suggestion_content(
            "```json\n{\"suggestions\": [{\"keyword\": \"docker\", \"placementSuggestion\": \"Skills\"}]}\n```",
        )
        .unwrap();
        assert_eq!(validate_suggestions(response).len(), 1);

        let response =
            parse_suggestion_content("[{\"keyword\": \"docker\", \"placementSuggestion\": \"Skills\"}]").unwrap();
        assert_eq!(validate_suggestions(response).len(), 1);

        let response = parse_suggestion_content("{\"notes\": \"nothing to add\"}").unwrap();
        assert!(response.suggestions.is_none());
    }

    #[test]
    fn test_parse_rejects_non_json() {
        assert!(matches!(
            parse_suggestion_content("Sure! Here are some ideas."),
            Err(SuggestionError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn test_request_skipped_without_missing_keywords() {
        let suggester = CannedSuggester(Err("must not be called".to_string()));
        let suggestions = request_suggestions(&suggester, &request(&[])).await.unwrap();
        assert!(suggestions.is_empty());
    }

    #[tokio::test]
    async fn test_request_validates_entries() {
        let suggester = CannedSuggester(Ok(json!({
            "suggestions": [
                {"keyword": "docker", "placementSuggestion": "Add to the Skills section."},
                {"keyword": "", "placementSuggestion": "ignored"}
            ]
        })));
        let suggestions = request_suggestions(&suggester, &request(&["docker"])).await.unwrap();
        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].placement_suggestion, "Add to the Skills section.");
    }

    #[tokio::test]
    async fn test_failure_maps_to_generic_error() {
        let suggester = CannedSuggester(Err("connection refused".to_string()));
        let err = request_suggestions(&suggester, &request(&["docker"])).await.unwrap_err();
        assert_eq!(err.to_string(), "Failed to generate suggestions. Please try again.");
    }

    #[test]
    fn test_http_suggester_reads_api_key_from_env() {
        let settings = SuggestionsConfig {
            api_key_env: Some("ATS_OPTIMIZER_TEST_KEY_UNSET_VAR".to_string()),
            ..SuggestionsConfig::default()
        };
        let suggester = HttpSuggester::new(&settings).unwrap();
        assert!(suggester.api_key.is_none());
        assert_eq!(suggester.model_name(), settings.model);
    }
}
