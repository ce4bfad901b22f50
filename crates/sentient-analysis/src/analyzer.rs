//! The analyzer service: prompt in, validated `AnalysisResult` out.

use std::sync::Arc;

use tracing::{debug, info};

use sentient_core::config::ModelConfig;
use sentient_core::AnalysisResult;
use sentient_gemini::{ModelProvider, StructuredRequest};

use crate::error::AnalysisError;
use crate::prompt::build_prompt;
use crate::schema::analysis_response_schema;

/// Number of actionable-improvement entries the contract requires.
const REQUIRED_ACTIONABLE_AREAS: usize = 3;

/// Adapter that turns raw review text into a structured analysis via the
/// remote model.
///
/// Stateless: each call is an independent single-shot request. The caller
/// owns the returned result and is responsible for replacing any prior one.
pub struct ReviewAnalyzer {
    provider: Arc<dyn ModelProvider>,
    model: String,
    max_input_chars: usize,
    thinking_budget: u32,
}

impl ReviewAnalyzer {
    /// Create an analyzer over the given provider.
    pub fn new(provider: Arc<dyn ModelProvider>, config: &ModelConfig) -> Self {
        Self {
            provider,
            model: config.analysis_model.clone(),
            max_input_chars: config.max_input_chars,
            thinking_budget: config.analysis_thinking_budget,
        }
    }

    /// Analyze raw review text.
    ///
    /// Rejects empty input, bounds the input length, invokes the provider
    /// with the declared response schema, parses the JSON result, and
    /// validates the exactly-three-areas contract. Numeric scores are
    /// carried verbatim; this adapter never clamps or invents values.
    pub async fn analyze(&self, text: &str) -> Result<AnalysisResult, AnalysisError> {
        if text.trim().is_empty() {
            return Err(AnalysisError::EmptyInput);
        }

        let prompt = build_prompt(text, self.max_input_chars);
        debug!(prompt_chars = prompt.len(), model = %self.model, "Dispatching analysis request");

        let raw = self
            .provider
            .generate_structured(StructuredRequest {
                model: self.model.clone(),
                prompt,
                response_schema: analysis_response_schema(),
                thinking_budget: Some(self.thinking_budget),
            })
            .await?;

        let result: AnalysisResult = serde_json::from_str(&raw)
            .map_err(|e| AnalysisError::Format(format!("response did not match schema: {e}")))?;
        validate(&result)?;

        info!(
            areas = result.top_actionable_areas.len(),
            trend_points = result.sentiment_trend.len(),
            keywords = result.word_cloud.len(),
            overall = result.overall_sentiment,
            "Analysis complete"
        );
        Ok(result)
    }
}

/// Contract checks stricter than the declared schema.
fn validate(result: &AnalysisResult) -> Result<(), AnalysisError> {
    let n = result.top_actionable_areas.len();
    if n != REQUIRED_ACTIONABLE_AREAS {
        return Err(AnalysisError::Format(format!(
            "expected exactly {REQUIRED_ACTIONABLE_AREAS} actionable areas, got {n}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use sentient_gemini::{ChatTurnRequest, GeminiError};
    use std::sync::Mutex;

    /// Provider stub: returns a canned payload (or fails) and records every
    /// structured request it receives.
    struct StubProvider {
        payload: Option<String>,
        seen: Mutex<Vec<StructuredRequest>>,
    }

    impl StubProvider {
        fn returning(payload: &str) -> Arc<Self> {
            Arc::new(Self {
                payload: Some(payload.to_string()),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                payload: None,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ModelProvider for StubProvider {
        async fn generate_structured(
            &self,
            req: StructuredRequest,
        ) -> Result<String, GeminiError> {
            self.seen.lock().unwrap().push(req);
            self.payload
                .clone()
                .ok_or_else(|| GeminiError::Request("stub provider failure".to_string()))
        }

        async fn send_chat(&self, _req: ChatTurnRequest) -> Result<String, GeminiError> {
            Err(GeminiError::Request("chat not stubbed".to_string()))
        }
    }

    fn analyzer(provider: Arc<StubProvider>) -> ReviewAnalyzer {
        ReviewAnalyzer::new(provider, &ModelConfig::default())
    }

    fn conformant_payload() -> String {
        serde_json::json!({
            "executiveSummary": "Customers praise speed and support but report login failures.",
            "topActionableAreas": ["Fix login flow", "Improve dark mode contrast", "Restore export feature"],
            "sentimentTrend": [
                {"index": 0, "label": "Oct 1", "sentimentScore": 0.9},
                {"index": 1, "label": "Oct 2", "sentimentScore": -0.7}
            ],
            "wordCloud": [
                {"text": "crashes", "value": 3, "sentiment": "NEGATIVE"},
                {"text": "fast", "value": 5, "sentiment": "POSITIVE"}
            ],
            "overallSentiment": 22.5
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_pass_through_of_conformant_payload() {
        let provider = StubProvider::returning(&conformant_payload());
        let result = analyzer(Arc::clone(&provider))
            .analyze("some reviews")
            .await
            .unwrap();

        assert_eq!(
            result.executive_summary,
            "Customers praise speed and support but report login failures."
        );
        assert_eq!(result.top_actionable_areas.len(), 3);
        assert_eq!(result.top_actionable_areas[0], "Fix login flow");
        assert_eq!(result.sentiment_trend[0].sentiment_score, 0.9);
        assert_eq!(result.sentiment_trend[1].sentiment_score, -0.7);
        assert_eq!(result.word_cloud[1].value, 5);
        assert_eq!(result.overall_sentiment, 22.5);
    }

    #[tokio::test]
    async fn test_request_carries_prompt_schema_and_model() {
        let provider = StubProvider::returning(&conformant_payload());
        analyzer(Arc::clone(&provider))
            .analyze("The app crashes on startup")
            .await
            .unwrap();

        let seen = provider.seen.lock().unwrap();
        assert_eq!(seen.len(), 1);
        let req = &seen[0];
        assert_eq!(req.model, "gemini-3-pro-preview");
        assert!(req.prompt.contains("The app crashes on startup"));
        assert!(req.prompt.starts_with("Analyze the following customer reviews."));
        assert_eq!(req.response_schema["type"], "OBJECT");
        assert_eq!(req.thinking_budget, Some(32_768));
    }

    #[tokio::test]
    async fn test_rejects_two_actionable_areas() {
        let payload = serde_json::json!({
            "executiveSummary": "s",
            "topActionableAreas": ["only", "two"],
            "sentimentTrend": [],
            "wordCloud": [],
            "overallSentiment": 0.0
        })
        .to_string();

        let err = analyzer(StubProvider::returning(&payload))
            .analyze("reviews")
            .await
            .unwrap_err();
        match err {
            AnalysisError::Format(msg) => assert!(msg.contains("got 2"), "{msg}"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rejects_four_actionable_areas() {
        let payload = serde_json::json!({
            "executiveSummary": "s",
            "topActionableAreas": ["a", "b", "c", "d"],
            "sentimentTrend": [],
            "wordCloud": [],
            "overallSentiment": 0.0
        })
        .to_string();

        let err = analyzer(StubProvider::returning(&payload))
            .analyze("reviews")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Format(_)));
    }

    #[tokio::test]
    async fn test_boundary_scores_accepted() {
        let payload = serde_json::json!({
            "executiveSummary": "s",
            "topActionableAreas": ["a", "b", "c"],
            "sentimentTrend": [
                {"index": 0, "label": "lo", "sentimentScore": -1.0},
                {"index": 1, "label": "hi", "sentimentScore": 1.0}
            ],
            "wordCloud": [],
            "overallSentiment": -100.0
        })
        .to_string();

        let result = analyzer(StubProvider::returning(&payload))
            .analyze("reviews")
            .await
            .unwrap();
        assert_eq!(result.overall_sentiment, -100.0);
        assert_eq!(result.sentiment_trend[0].sentiment_score, -1.0);
        assert_eq!(result.sentiment_trend[1].sentiment_score, 1.0);

        let payload = payload.replace("-100.0", "100.0");
        let result = analyzer(StubProvider::returning(&payload))
            .analyze("reviews")
            .await
            .unwrap();
        assert_eq!(result.overall_sentiment, 100.0);
    }

    #[tokio::test]
    async fn test_out_of_range_scores_pass_through_unclamped() {
        // The adapter must not silently clamp: out-of-range provider values
        // are carried verbatim rather than invented or corrected.
        let payload = serde_json::json!({
            "executiveSummary": "s",
            "topActionableAreas": ["a", "b", "c"],
            "sentimentTrend": [
                {"index": 0, "label": "wild", "sentimentScore": 2.5}
            ],
            "wordCloud": [],
            "overallSentiment": 150.0
        })
        .to_string();

        let result = analyzer(StubProvider::returning(&payload))
            .analyze("reviews")
            .await
            .unwrap();
        assert_eq!(result.overall_sentiment, 150.0);
        assert_eq!(result.sentiment_trend[0].sentiment_score, 2.5);
    }

    #[tokio::test]
    async fn test_empty_input_rejected_without_provider_call() {
        let provider = StubProvider::returning(&conformant_payload());
        let err = analyzer(Arc::clone(&provider)).analyze("").await.unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyInput));

        let err = analyzer(Arc::clone(&provider))
            .analyze("   \n\t ")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyInput));

        assert!(provider.seen.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_provider_failure_surfaces_as_provider_error() {
        let err = analyzer(StubProvider::failing())
            .analyze("reviews")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Provider(_)));
    }

    #[tokio::test]
    async fn test_unparseable_json_is_format_error() {
        let err = analyzer(StubProvider::returning("this is not json"))
            .analyze("reviews")
            .await
            .unwrap_err();
        assert!(matches!(err, AnalysisError::Format(_)));
    }

    #[tokio::test]
    async fn test_long_input_prompt_is_bounded() {
        let provider = StubProvider::returning(&conformant_payload());
        let mut config = ModelConfig::default();
        config.max_input_chars = 64;
        let analyzer = ReviewAnalyzer::new(Arc::clone(&provider) as Arc<dyn ModelProvider>, &config);

        let long_input = "review ".repeat(100);
        analyzer.analyze(&long_input).await.unwrap();

        let seen = provider.seen.lock().unwrap();
        let embedded = seen[0].prompt.split("Reviews:\n").nth(1).unwrap();
        assert_eq!(embedded.chars().count(), 64);
    }
}
