//! Error types for the Gemini provider.

use sentient_core::SentientError;

/// Errors from the remote model provider.
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("API key is missing or empty")]
    MissingApiKey,
    #[error("request failed: {0}")]
    Request(String),
    #[error("API returned {status}: {message}")]
    Api { status: u16, message: String },
    #[error("response contained no text candidates")]
    EmptyResponse,
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl From<GeminiError> for SentientError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::MissingApiKey => SentientError::Config(err.to_string()),
            GeminiError::EmptyResponse | GeminiError::MalformedResponse(_) => {
                SentientError::Format(err.to_string())
            }
            _ => SentientError::Provider(err.to_string()),
        }
    }
}
