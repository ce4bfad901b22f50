//! Analysis Request Adapter.
//!
//! Builds a single-shot prompt from raw review text, declares the expected
//! structured-output shape, invokes the remote model, and parses the JSON
//! result into [`sentient_core::AnalysisResult`]. Single request/response per
//! user action: no retries, no backoff, no caching.

pub mod analyzer;
pub mod error;
pub mod prompt;
pub mod schema;

pub use analyzer::ReviewAnalyzer;
pub use error::AnalysisError;
pub use prompt::SAMPLE_REVIEWS;
