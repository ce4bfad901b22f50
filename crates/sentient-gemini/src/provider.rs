//! The provider port that the analysis and chat adapters program against.
//!
//! Implementors encapsulate transport, serialization, and vendor-specific
//! API details. Consumers remain decoupled from any particular provider or
//! HTTP client library, which is also what makes the adapters testable with
//! a stub.

use async_trait::async_trait;

use crate::error::GeminiError;

/// A single-shot generation request with a declared output shape.
#[derive(Clone, Debug)]
pub struct StructuredRequest {
    /// Model identifier, e.g. "gemini-3-pro-preview".
    pub model: String,
    /// The full prompt text (reviews already embedded).
    pub prompt: String,
    /// JSON schema the response must conform to, in the provider's
    /// declaration format.
    pub response_schema: serde_json::Value,
    /// Optional thinking budget forwarded to the provider.
    pub thinking_budget: Option<u32>,
}

/// One prior turn of a conversation.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatTurn {
    /// "user" or "model" in the provider's role vocabulary.
    pub role: &'static str,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: "user",
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: "model",
            text: text.into(),
        }
    }
}

/// A chat continuation request: seed instruction, history, new message.
#[derive(Clone, Debug)]
pub struct ChatTurnRequest {
    pub model: String,
    /// System instruction the session was seeded with.
    pub system_instruction: String,
    /// Prior turns, oldest first.
    pub history: Vec<ChatTurn>,
    /// The new user message.
    pub message: String,
    /// Optional thinking budget forwarded to the provider.
    pub thinking_budget: Option<u32>,
}

/// An interface for sending prompts to the remote model.
///
/// One-shot structured generation for analysis; stateless chat continuation
/// for the follow-up widget (the conversation state lives with the caller,
/// which is what allows session invalidation by replacement).
#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Send a single-shot prompt with a declared response schema and return
    /// the raw JSON text the model produced.
    async fn generate_structured(&self, req: StructuredRequest) -> Result<String, GeminiError>;

    /// Send one chat turn (instruction + history + message) and return the
    /// assistant's reply text.
    async fn send_chat(&self, req: ChatTurnRequest) -> Result<String, GeminiError>;
}
