use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Sentiment category attached to a word-cloud entry.
///
/// The wire form matches the structured-output contract declared to the
/// model provider (`POSITIVE` / `NEGATIVE` / `NEUTRAL`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

impl Sentiment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "POSITIVE",
            Sentiment::Negative => "NEGATIVE",
            Sentiment::Neutral => "NEUTRAL",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "POSITIVE" => Some(Sentiment::Positive),
            "NEGATIVE" => Some(Sentiment::Negative),
            "NEUTRAL" => Some(Sentiment::Neutral),
            _ => None,
        }
    }
}

/// Author of a chat message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    User,
    Assistant,
}

// =============================================================================
// Analysis types
// =============================================================================

/// One point on the sentiment trend line.
///
/// Ordering is significant: points are sequential (chronological when the
/// input carries dates). `sentiment_score` is in `-1..1` as declared to the
/// provider; the value is carried verbatim, never clamped locally.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SentimentDataPoint {
    /// Sequence index within the trend.
    pub index: u32,
    /// Display label, e.g. "Oct 1" or "Batch 1".
    pub label: String,
    /// Average sentiment for this point, -1 (negative) to 1 (positive).
    pub sentiment_score: f64,
}

/// A frequency-weighted keyword for the word cloud.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordCloudItem {
    /// Display text of the keyword or phrase.
    pub text: String,
    /// Frequency count.
    pub value: u32,
    /// Sentiment category for coloring.
    pub sentiment: Sentiment,
}

/// The structured analysis returned by the model provider.
///
/// Field names serialize in the provider's camelCase wire form so the parsed
/// JSON maps onto this struct directly. An `AnalysisResult` is immutable once
/// produced; a new analysis replaces the previous one wholesale.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Executive summary of the reviews.
    pub executive_summary: String,
    /// Exactly three actionable improvement areas.
    pub top_actionable_areas: Vec<String>,
    /// Sentiment over the sequence of reviews.
    pub sentiment_trend: Vec<SentimentDataPoint>,
    /// Top keywords with frequency and sentiment.
    pub word_cloud: Vec<WordCloudItem>,
    /// Overall sentiment score, -100 to 100, carried verbatim.
    pub overall_sentiment: f64,
}

/// An analysis result bound to a unique identifier.
///
/// The id is the staleness token: a chat session created against one snapshot
/// is discarded as soon as the current snapshot id differs (sessions are
/// never mutated in place).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSnapshot {
    pub id: Uuid,
    pub result: AnalysisResult,
    pub created_at: DateTime<Utc>,
}

impl AnalysisSnapshot {
    /// Wrap a freshly parsed result with a new snapshot id.
    pub fn new(result: AnalysisResult) -> Self {
        Self {
            id: Uuid::new_v4(),
            result,
            created_at: Utc::now(),
        }
    }
}

// =============================================================================
// Chat types
// =============================================================================

/// A single message in the chat transcript.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    /// Create a new message stamped with the current time.
    pub fn new(role: ChatRole, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}
