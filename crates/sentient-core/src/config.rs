use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::{Result, SentientError};

/// Environment variable that holds the Gemini API key.
///
/// The key is read from the process environment at startup; it is never
/// stored in the config file. Absence is a hard configuration failure.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Top-level configuration for the Sentient application.
///
/// Loaded from `~/.sentient/config.toml` by default. Each section corresponds
/// to a bounded context or cross-cutting concern.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SentientConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub model: ModelConfig,
}

impl SentientConfig {
    /// Load configuration from a TOML file.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: SentientConfig = toml::from_str(&content)?;
        info!("Configuration loaded from {}", path.display());
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the
    /// file does not exist or cannot be parsed.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}. Using defaults.",
                    path.display(),
                    e
                );
                Self::default()
            }
        }
    }

    /// Save the current configuration to a TOML file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| SentientError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        info!("Configuration saved to {}", path.display());
        Ok(())
    }
}

/// Read the Gemini API key from the process environment.
///
/// An unset or empty variable is a configuration error: both adapters
/// require the credential, so startup fails rather than limping along.
pub fn api_key_from_env() -> Result<String> {
    match std::env::var(API_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => Ok(key),
        _ => Err(SentientError::Config(format!(
            "{} is not set; export a Gemini API key before starting",
            API_KEY_ENV
        ))),
    }
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// API server port.
    pub port: u16,
    /// Log level: trace, debug, info, warn, error.
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            port: 3030,
            log_level: "info".to_string(),
        }
    }
}

/// Model provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model identifier for one-shot analysis requests.
    pub analysis_model: String,
    /// Model identifier for chat turns.
    pub chat_model: String,
    /// Bounded prefix length for review input, in characters. Longer input
    /// is truncated (with a logged warning) to respect provider limits.
    pub max_input_chars: usize,
    /// Maximum chat message length, in characters.
    pub max_chat_message_chars: usize,
    /// Thinking budget for analysis requests (deep analysis).
    pub analysis_thinking_budget: u32,
    /// Thinking budget for chat turns (quick responses).
    pub chat_thinking_budget: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            analysis_model: "gemini-3-pro-preview".to_string(),
            chat_model: "gemini-3-pro-preview".to_string(),
            max_input_chars: 50_000,
            max_chat_message_chars: 2_000,
            analysis_thinking_budget: 32_768,
            chat_thinking_budget: 4_096,
        }
    }
}
