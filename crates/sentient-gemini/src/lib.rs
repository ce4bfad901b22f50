//! Gemini provider crate - wire types, provider trait, HTTP client.
//!
//! Everything that talks to the remote model lives here: the `ModelProvider`
//! trait that the analysis and chat adapters program against, and the
//! `GeminiClient` that implements it over the Gemini REST API.

pub mod client;
pub mod error;
pub mod provider;

pub use client::GeminiClient;
pub use error::GeminiError;
pub use provider::{ChatTurn, ChatTurnRequest, ModelProvider, StructuredRequest};
