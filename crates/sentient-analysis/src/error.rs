//! Error types for the analysis adapter.

use sentient_core::SentientError;
use sentient_gemini::GeminiError;

/// Errors from the Analysis Request Adapter.
///
/// The taxonomy mirrors how failures surface to the user: configuration
/// problems fail immediately, provider and format problems become one
/// user-facing "analysis failed" message, and none of them are retried.
#[derive(Debug, thiserror::Error)]
pub enum AnalysisError {
    #[error("input text cannot be empty")]
    EmptyInput,
    #[error("configuration error: {0}")]
    Config(String),
    #[error("provider error: {0}")]
    Provider(String),
    #[error("format error: {0}")]
    Format(String),
}

impl From<GeminiError> for AnalysisError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::MissingApiKey => AnalysisError::Config(err.to_string()),
            GeminiError::EmptyResponse | GeminiError::MalformedResponse(_) => {
                AnalysisError::Format(err.to_string())
            }
            _ => AnalysisError::Provider(err.to_string()),
        }
    }
}

impl From<AnalysisError> for SentientError {
    fn from(err: AnalysisError) -> Self {
        match err {
            AnalysisError::Config(msg) => SentientError::Config(msg),
            AnalysisError::Provider(msg) => SentientError::Provider(msg),
            AnalysisError::Format(msg) => SentientError::Format(msg),
            AnalysisError::EmptyInput => SentientError::Analysis(err.to_string()),
        }
    }
}
