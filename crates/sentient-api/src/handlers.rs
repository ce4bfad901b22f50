//! Route handlers for the Sentient API.
//!
//! Handlers never hold a state lock across a provider await: they snapshot
//! what they need under the lock, call out, then re-lock and apply only if
//! the state they started from is still current.

use axum::extract::State;
use axum::response::Html;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::info;

use sentient_analysis::SAMPLE_REVIEWS;
use sentient_core::{AnalysisSnapshot, ChatMessage};
use sentient_ui::DASHBOARD_HTML;

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

/// Response for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub has_analysis: bool,
}

/// Response for GET /sample.
#[derive(Debug, Serialize)]
pub struct SampleResponse {
    pub text: String,
}

/// Request body for POST /analyze.
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    pub text: String,
}

/// Response for GET /chat/messages.
#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub messages: Vec<ChatMessage>,
    pub waiting: bool,
}

/// Request body for POST /chat/send.
#[derive(Debug, Deserialize)]
pub struct ChatSendRequest {
    pub text: String,
}

/// Response for POST /chat/send.
#[derive(Debug, Serialize)]
pub struct ChatSendResponse {
    pub reply: ChatMessage,
}

fn lock_poisoned() -> ApiError {
    ApiError::Internal("state lock poisoned".to_string())
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /health - server liveness and basic status.
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let has_analysis = state
        .analysis
        .lock()
        .map_err(|_| lock_poisoned())?
        .current
        .is_some();
    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        has_analysis,
    }))
}

/// GET /ui - serve the embedded dashboard.
pub async fn ui() -> Html<&'static str> {
    Html(DASHBOARD_HTML)
}

/// GET /sample - the bundled sample review dataset.
pub async fn sample() -> Json<SampleResponse> {
    Json(SampleResponse {
        text: SAMPLE_REVIEWS.to_string(),
    })
}

/// GET /analysis - the current analysis snapshot, if one exists.
pub async fn get_analysis(
    State(state): State<AppState>,
) -> Result<Json<AnalysisSnapshot>, ApiError> {
    let snapshot = state
        .analysis
        .lock()
        .map_err(|_| lock_poisoned())?
        .current
        .clone();
    match snapshot {
        Some(snapshot) => Ok(Json(snapshot)),
        None => Err(ApiError::NotFound("no analysis has been run yet".to_string())),
    }
}

/// POST /analyze - run a full analysis of the submitted review text.
///
/// On success the new snapshot replaces the previous one atomically and the
/// chat session is invalidated. On failure the previous snapshot is left
/// untouched. A completion that arrives after another analysis has already
/// been applied is discarded rather than letting it overwrite newer state.
pub async fn analyze(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisSnapshot>, ApiError> {
    let started_epoch = state.analysis.lock().map_err(|_| lock_poisoned())?.epoch;

    let result = state.analyzer.analyze(&req.text).await?;

    let snapshot = {
        let mut analysis = state.analysis.lock().map_err(|_| lock_poisoned())?;
        if analysis.epoch != started_epoch {
            return Err(ApiError::Conflict(
                "analysis superseded by a newer request".to_string(),
            ));
        }
        analysis.epoch += 1;
        let snapshot = AnalysisSnapshot::new(result);
        analysis.current = Some(snapshot.clone());
        snapshot
    };

    state.chat.lock().map_err(|_| lock_poisoned())?.invalidate();

    info!(snapshot_id = %snapshot.id, "Applied new analysis snapshot");
    Ok(Json(snapshot))
}

/// GET /chat/messages - the visible chat transcript.
pub async fn chat_messages(
    State(state): State<AppState>,
) -> Result<Json<TranscriptResponse>, ApiError> {
    let chat = state.chat.lock().map_err(|_| lock_poisoned())?;
    Ok(Json(TranscriptResponse {
        messages: chat.messages().to_vec(),
        waiting: chat.is_waiting(),
    }))
}

/// POST /chat/send - send one chat message grounded in the current analysis.
///
/// Requires an analysis snapshot; the session is (re)seeded from it when
/// needed. Provider failures are returned as a substitute assistant reply
/// with status 200, matching the transcript the user sees.
pub async fn chat_send(
    State(state): State<AppState>,
    Json(req): Json<ChatSendRequest>,
) -> Result<Json<ChatSendResponse>, ApiError> {
    let snapshot = state
        .analysis
        .lock()
        .map_err(|_| lock_poisoned())?
        .current
        .clone()
        .ok_or(ApiError::from(sentient_chat::ChatError::NoAnalysis))?;

    let outbound = state
        .chat
        .lock()
        .map_err(|_| lock_poisoned())?
        .begin_send(&req.text, &snapshot)?;

    let outcome = state.provider.send_chat(outbound).await;

    let reply = state
        .chat
        .lock()
        .map_err(|_| lock_poisoned())?
        .complete_send(snapshot.id, req.text.trim(), outcome)
        .cloned();

    match reply {
        Some(reply) => Ok(Json(ChatSendResponse { reply })),
        None => Err(ApiError::Conflict(
            "analysis changed while the message was in flight".to_string(),
        )),
    }
}

// ============================================================================
// Tests
// ============================================================================
