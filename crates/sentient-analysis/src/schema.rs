//! Declared structured-output schema for the analysis request.
//!
//! The provider enforces this shape server-side; the adapter still validates
//! the parsed result because the contract (exactly three actionable areas)
//! is stricter than what the schema language can express.

use serde_json::{json, Value};

/// The response schema declared to the provider, in Gemini's declaration
/// format (uppercase type names).
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "executiveSummary": {
                "type": "STRING",
                "description": "A comprehensive executive summary of the reviews, detailing key strengths and weaknesses."
            },
            "topActionableAreas": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "Exactly 3 distinct, actionable areas for improvement based on the reviews."
            },
            "sentimentTrend": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "index": { "type": "INTEGER" },
                        "label": {
                            "type": "STRING",
                            "description": "Time label or sequence group (e.g. 'Batch 1')"
                        },
                        "sentimentScore": {
                            "type": "NUMBER",
                            "description": "Average sentiment score between -1 (negative) and 1 (positive)."
                        }
                    }
                },
                "description": "Trend of sentiment over the sequence of reviews."
            },
            "wordCloud": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "text": { "type": "STRING" },
                        "value": { "type": "INTEGER", "description": "Frequency count" },
                        "sentiment": {
                            "type": "STRING",
                            "enum": ["POSITIVE", "NEGATIVE", "NEUTRAL"]
                        }
                    }
                },
                "description": "List of top 20 most frequent significant keywords or phrases."
            },
            "overallSentiment": {
                "type": "NUMBER",
                "description": "Overall sentiment score from -100 to 100."
            }
        },
        "required": [
            "executiveSummary",
            "topActionableAreas",
            "sentimentTrend",
            "wordCloud",
            "overallSentiment"
        ]
    })
}
