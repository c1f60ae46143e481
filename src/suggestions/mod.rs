//! Keyword placement suggestions module

pub mod client;
pub mod model;
pub mod prompts;

pub use client::{request_suggestions, HttpSuggester, KeywordSuggester, SuggestionError};
pub use model::{validate_suggestions, LenientSuggestionResponse, Suggestion, SuggestionRequest};
