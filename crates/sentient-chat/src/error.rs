//! Error types for the chat adapter.

/// Errors from the chat engine.
///
/// Provider failures are deliberately absent: they are rendered as a
/// substitute assistant message to preserve conversational flow, not
/// surfaced as errors.
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("message cannot be empty")]
    EmptyMessage,
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),
    #[error("no analysis is loaded yet")]
    NoAnalysis,
}
