//! The chat engine: transcript, waiting flag, and send lifecycle.
//!
//! Sending is split into `begin_send` / `complete_send` so the caller never
//! holds a lock on the engine across the provider await. `begin_send`
//! reconciles the session against the current snapshot and returns the
//! outbound request; `complete_send` applies the reply only if the session
//! still belongs to the originating snapshot.

use tracing::debug;
use uuid::Uuid;

use sentient_core::config::ModelConfig;
use sentient_core::{AnalysisSnapshot, ChatMessage, ChatRole};
use sentient_gemini::{ChatTurn, ChatTurnRequest, GeminiError};

use crate::error::ChatError;
use crate::session::{ChatSession, SessionState};

/// First greeting shown when the widget opens on a fresh analysis.
const INITIAL_GREETING: &str =
    "Hello! I've analyzed your data. Ask me anything about the customer feedback trends or specific issues.";

/// Greeting shown after the analysis changes and the transcript resets.
const RESET_GREETING: &str =
    "I'm ready to discuss the new analysis results. What would you like to know?";

/// Substitute assistant reply when the provider call fails.
const ERROR_REPLY: &str = "Sorry, I encountered an error connecting to Gemini.";

/// Owns the chat session state machine and the visible transcript.
pub struct ChatEngine {
    model: String,
    thinking_budget: u32,
    max_message_chars: usize,
    state: SessionState,
    messages: Vec<ChatMessage>,
    waiting: bool,
}

impl ChatEngine {
    /// Create an engine with an empty session and the initial greeting.
    pub fn new(config: &ModelConfig) -> Self {
        Self {
            model: config.chat_model.clone(),
            thinking_budget: config.chat_thinking_budget,
            max_message_chars: config.max_chat_message_chars,
            state: SessionState::Absent,
            messages: vec![ChatMessage::new(ChatRole::Assistant, INITIAL_GREETING)],
            waiting: false,
        }
    }

    /// The visible transcript, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Whether a send is in flight.
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    /// Current session state (for inspection).
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Invalidate the session because a new analysis arrived.
    ///
    /// Forces recreation on the next send and resets the transcript, so the
    /// next session is seeded from the new snapshot rather than the stale one.
    pub fn invalidate(&mut self) {
        self.state = SessionState::Absent;
        self.waiting = false;
        self.messages = vec![ChatMessage::new(ChatRole::Assistant, RESET_GREETING)];
    }

    /// Start a send: validate, reconcile the session with the current
    /// snapshot, append the user message, and return the outbound request.
    ///
    /// The caller performs the provider call (outside any lock) and then
    /// calls [`Self::complete_send`] with the outcome.
    pub fn begin_send(
        &mut self,
        text: &str,
        current: &AnalysisSnapshot,
    ) -> Result<ChatTurnRequest, ChatError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if text.chars().count() > self.max_message_chars {
            return Err(ChatError::MessageTooLong(self.max_message_chars));
        }

        // Reconciliation rule: keep the session only if it is bound to the
        // current snapshot; otherwise discard and reseed.
        let needs_new = match &self.state {
            SessionState::Active(session) => session.snapshot_id != current.id,
            SessionState::Absent => true,
        };
        if needs_new {
            debug!(snapshot_id = %current.id, "Seeding chat session from current analysis");
            self.state = SessionState::Active(ChatSession::seeded_from(current));
        }

        self.messages.push(ChatMessage::new(ChatRole::User, text));
        self.waiting = true;

        let session = match &self.state {
            SessionState::Active(session) => session,
            SessionState::Absent => unreachable!("session seeded above"),
        };
        Ok(ChatTurnRequest {
            model: self.model.clone(),
            system_instruction: session.system_instruction.clone(),
            history: session.history.clone(),
            message: text.to_string(),
            thinking_budget: Some(self.thinking_budget),
        })
    }

    /// Finish a send: append the reply (or the substitute error message) to
    /// the transcript and record the turn in the session history.
    ///
    /// Applied only if the session still belongs to `snapshot_id`; a reply
    /// arriving after the analysis changed is dropped so it cannot overwrite
    /// newer state. Returns the appended assistant message, if any.
    pub fn complete_send(
        &mut self,
        snapshot_id: Uuid,
        user_text: &str,
        outcome: Result<String, GeminiError>,
    ) -> Option<&ChatMessage> {
        let session = match &mut self.state {
            SessionState::Active(session) if session.snapshot_id == snapshot_id => session,
            _ => {
                debug!(snapshot_id = %snapshot_id, "Dropping chat reply for stale session");
                return None;
            }
        };

        let reply = match outcome {
            Ok(text) => {
                session.history.push(ChatTurn::user(user_text));
                session.history.push(ChatTurn::model(&text));
                text
            }
            Err(err) => {
                debug!(error = %err, "Chat provider call failed; substituting error reply");
                ERROR_REPLY.to_string()
            }
        };

        self.waiting = false;
        self.messages.push(ChatMessage::new(ChatRole::Assistant, reply));
        self.messages.last()
    }
}
