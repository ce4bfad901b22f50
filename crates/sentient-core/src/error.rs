use thiserror::Error;

/// Top-level error type for the Sentient system.
///
/// Each variant wraps a subsystem-specific error. Subsystem crates define
/// their own error types and implement `From<SubsystemError> for
/// SentientError` so that the `?` operator works seamlessly across crate
/// boundaries.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SentientError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Format error: {0}")]
    Format(String),

    #[error("Analysis error: {0}")]
    Analysis(String),

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("API error: {0}")]
    Api(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<toml::de::Error> for SentientError {
    fn from(err: toml::de::Error) -> Self {
        SentientError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for SentientError {
    fn from(err: toml::ser::Error) -> Self {
        SentientError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for SentientError {
    fn from(err: serde_json::Error) -> Self {
        SentientError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for Sentient operations.
pub type Result<T> = std::result::Result<T, SentientError>;
