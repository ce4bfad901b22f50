//! Application state shared across all route handlers.
//!
//! AppState holds the adapters and the single pieces of mutable state: the
//! current analysis snapshot and the chat engine. It is passed to handlers
//! via axum's State extractor.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use sentient_analysis::ReviewAnalyzer;
use sentient_chat::ChatEngine;
use sentient_core::config::SentientConfig;
use sentient_core::AnalysisSnapshot;
use sentient_gemini::ModelProvider;

/// The current analysis and its generation counter.
///
/// `epoch` increments once per applied analysis. A completion whose
/// originating epoch no longer matches is stale and must be discarded
/// instead of overwriting newer state.
#[derive(Debug, Default)]
pub struct AnalysisState {
    pub epoch: u64,
    pub current: Option<AnalysisSnapshot>,
}

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks. Mutable
/// state is protected by `Mutex`; no lock is ever held across a provider
/// await (handlers snapshot what they need, call out, then re-lock to
/// apply).
#[derive(Clone)]
pub struct AppState {
    /// Application configuration.
    pub config: Arc<Mutex<SentientConfig>>,
    /// The remote model provider, shared by both adapters.
    pub provider: Arc<dyn ModelProvider>,
    /// Analysis Request Adapter.
    pub analyzer: Arc<ReviewAnalyzer>,
    /// Chat Session Adapter.
    pub chat: Arc<Mutex<ChatEngine>>,
    /// Current analysis snapshot plus its epoch counter.
    pub analysis: Arc<Mutex<AnalysisState>>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState over the given provider.
    pub fn new(config: SentientConfig, provider: Arc<dyn ModelProvider>) -> Self {
        let analyzer = Arc::new(ReviewAnalyzer::new(Arc::clone(&provider), &config.model));
        let chat = Arc::new(Mutex::new(ChatEngine::new(&config.model)));
        Self {
            config: Arc::new(Mutex::new(config)),
            provider,
            analyzer,
            chat,
            analysis: Arc::new(Mutex::new(AnalysisState::default())),
            start_time: Instant::now(),
        }
    }
}
