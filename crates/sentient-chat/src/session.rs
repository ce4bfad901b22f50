//! Session state and seed-instruction construction.

use uuid::Uuid;

use sentient_core::{AnalysisResult, AnalysisSnapshot};
use sentient_gemini::ChatTurn;

/// The two-state session machine.
///
/// `Absent` until the first send after an analysis exists; back to `Absent`
/// whenever a new analysis snapshot arrives. A stale `Active` session is
/// discarded wholesale on the next send, never reseeded in place.
#[derive(Debug)]
pub enum SessionState {
    Absent,
    Active(ChatSession),
}

/// An active conversation bound to one analysis snapshot.
#[derive(Debug)]
pub struct ChatSession {
    /// Id of the snapshot the seed instruction embeds.
    pub snapshot_id: Uuid,
    /// The system instruction the session was created with.
    pub system_instruction: String,
    /// Completed turns, oldest first.
    pub history: Vec<ChatTurn>,
}

impl ChatSession {
    /// Create a session seeded with the given snapshot's analysis context.
    pub fn seeded_from(snapshot: &AnalysisSnapshot) -> Self {
        Self {
            snapshot_id: snapshot.id,
            system_instruction: seed_instruction(&snapshot.result),
            history: Vec::new(),
        }
    }
}

/// Build the system instruction embedding the current analysis context.
pub fn seed_instruction(result: &AnalysisResult) -> String {
    format!(
        "You are a helpful data analyst assistant for the \"Sentient\" dashboard. \
You have access to the current analysis of customer reviews.\n\n\
Current Analysis Context:\n\
- Executive Summary: {summary}\n\
- Top Issues: {issues}\n\
- Overall Score: {score}\n\n\
Answer questions specifically about this data. Be concise and professional. \
If the user asks about something not in the data, explain that you only have \
access to the summary provided.",
        summary = result.executive_summary,
        issues = result.top_actionable_areas.join(", "),
        score = result.overall_sentiment,
    )
}
