//! Sentient API crate - axum HTTP server and route handlers.
//!
//! Provides the REST API the dashboard talks to: analysis submission and
//! retrieval, the chat transcript and send endpoints, the embedded UI, and
//! health checks.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
