//! Sentient application binary - composition root.
//!
//! Ties together all Sentient crates into a single executable:
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Read the Gemini API key from the environment
//! 3. Build the Gemini client and the shared application state
//! 4. Start the axum REST API server with the embedded dashboard

mod cli;

use std::sync::Arc;

use clap::Parser;

use sentient_api::{create_router, AppState};
use sentient_core::config::{api_key_from_env, SentientConfig, API_KEY_ENV};
use sentient_gemini::{GeminiClient, ModelProvider};

use crate::cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config first, so the CLI log-level override can win over the file.
    let config_file = args.resolve_config_path();
    let mut config = SentientConfig::load_or_default(&config_file);
    if let Some(level) = args.resolve_log_level() {
        config.general.log_level = level;
    }
    config.general.port = args.resolve_port(config.general.port);

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.general.log_level.clone())),
        )
        .init();

    tracing::info!("Starting Sentient v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Credential. A missing key is a startup failure, not a per-request one.
    let api_key = match api_key_from_env() {
        Ok(key) => key,
        Err(e) => {
            tracing::error!(error = %e, "No API key available");
            tracing::error!("Set the {} environment variable and restart", API_KEY_ENV);
            return Err(e.into());
        }
    };

    let provider: Arc<dyn ModelProvider> = Arc::new(GeminiClient::new(api_key)?);
    tracing::info!(
        analysis_model = %config.model.analysis_model,
        chat_model = %config.model.chat_model,
        "Gemini client ready"
    );

    let port = config.general.port;
    let state = AppState::new(config, provider);

    // === API server ===

    let addr = format!("127.0.0.1:{}", port);
    let router = create_router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "Failed to bind — is another instance running?");
            tracing::error!("Try: SENTIENT_PORT={} cargo run -p sentient-app", port + 1);
            return Err(e.into());
        }
    };

    tracing::info!(addr = %addr, "API server listening");
    tracing::info!("Dashboard at http://{}/ui", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
