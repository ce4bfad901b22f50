//! Chat Session Adapter.
//!
//! Owns the follow-up conversation: an explicit session state machine bound
//! to one analysis snapshot, the visible transcript, and a waiting flag.
//! Sessions are seeded with the current analysis context and discarded, never
//! mutated, when the analysis changes.

pub mod engine;
pub mod error;
pub mod session;

pub use engine::ChatEngine;
pub use error::ChatError;
pub use session::{seed_instruction, ChatSession, SessionState};
