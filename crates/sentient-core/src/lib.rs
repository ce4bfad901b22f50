pub mod config;
pub mod error;
pub mod types;

pub use config::SentientConfig;
pub use error::{Result, SentientError};
pub use types::*;
