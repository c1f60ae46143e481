//! Error handling for the ATS optimizer

use thiserror::Error;

/// Message shown to the user whenever the keyword placement suggester fails.
pub const SUGGESTION_FAILURE_MESSAGE: &str = "Failed to generate suggestions. Please try again.";

#[derive(Error, Debug)]
pub enum AtsOptimizerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Suggestion(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

impl AtsOptimizerError {
    /// The single user-facing error for a failed suggester call.
    pub fn suggestion_failure() -> Self {
        AtsOptimizerError::Suggestion(SUGGESTION_FAILURE_MESSAGE.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AtsOptimizerError>;
