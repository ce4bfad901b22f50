//! GeminiClient - direct REST implementation of [`ModelProvider`].
//!
//! Calls the Gemini `generateContent` endpoint. Requests are single-shot:
//! no retries, no backoff, no caching, and no client-side timeout beyond
//! reqwest's defaults. A failed call surfaces as an error for the caller to
//! convert into one user-facing message.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GeminiError;
use crate::provider::{ChatTurnRequest, ModelProvider, StructuredRequest};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// HTTP client for the Gemini REST API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a client with the provided API key.
    ///
    /// An empty key is rejected up front so the failure happens at startup
    /// rather than on the first user action.
    pub fn new(api_key: impl Into<String>) -> Result<Self, GeminiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::MissingApiKey);
        }
        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: BASE_URL.to_string(),
        })
    }

    /// Overrides the endpoint base URL (e.g. for a local test server).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn send_request(
        &self,
        model: &str,
        body: &GenerateContentRequest,
    ) -> Result<String, GeminiError> {
        let url = format!(
            "{}/{model}:generateContent?key={key}",
            self.base_url,
            model = model,
            key = self.api_key
        );

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|err| GeminiError::Request(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|err| GeminiError::MalformedResponse(err.to_string()))?;

        extract_text(parsed)
    }
}

#[async_trait]
impl ModelProvider for GeminiClient {
    async fn generate_structured(&self, req: StructuredRequest) -> Result<String, GeminiError> {
        debug!(model = %req.model, prompt_chars = req.prompt.len(), "Structured generation request");
        let body = build_structured_request(&req);
        self.send_request(&req.model, &body).await
    }

    async fn send_chat(&self, req: ChatTurnRequest) -> Result<String, GeminiError> {
        debug!(model = %req.model, history_turns = req.history.len(), "Chat turn request");
        let body = build_chat_request(&req);
        self.send_request(&req.model, &body).await
    }
}

fn build_structured_request(req: &StructuredRequest) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: req.prompt.clone(),
            }],
        }],
        system_instruction: None,
        generation_config: Some(GenerationConfig {
            response_mime_type: Some("application/json".to_string()),
            response_schema: Some(req.response_schema.clone()),
            thinking_config: req.thinking_budget.map(|b| ThinkingConfig { thinking_budget: b }),
        }),
    }
}

fn build_chat_request(req: &ChatTurnRequest) -> GenerateContentRequest {
    let mut contents: Vec<Content> = req
        .history
        .iter()
        .map(|turn| Content {
            role: turn.role.to_string(),
            parts: vec![Part {
                text: turn.text.clone(),
            }],
        })
        .collect();
    contents.push(Content {
        role: "user".to_string(),
        parts: vec![Part {
            text: req.message.clone(),
        }],
    });

    let generation_config = req.thinking_budget.map(|b| GenerationConfig {
        response_mime_type: None,
        response_schema: None,
        thinking_config: Some(ThinkingConfig { thinking_budget: b }),
    });

    GenerateContentRequest {
        contents,
        system_instruction: Some(Content {
            role: "system".to_string(),
            parts: vec![Part {
                text: req.system_instruction.clone(),
            }],
        }),
        generation_config,
    }
}

// =============================================================================
// Wire types
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
    thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text(response: GenerateContentResponse) -> Result<String, GeminiError> {
    response
        .candidates
        .and_then(|mut candidates| {
            if candidates.is_empty() {
                None
            } else {
                Some(candidates.swap_remove(0))
            }
        })
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or(GeminiError::EmptyResponse)
}

fn map_http_error(status: StatusCode, body: String) -> GeminiError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    GeminiError::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ChatTurn;

    fn structured_fixture() -> StructuredRequest {
        StructuredRequest {
            model: "gemini-3-pro-preview".to_string(),
            prompt: "Analyze these reviews".to_string(),
            response_schema: serde_json::json!({"type": "OBJECT"}),
            thinking_budget: Some(32_768),
        }
    }

    #[test]
    fn test_client_rejects_empty_key() {
        assert!(matches!(
            GeminiClient::new(""),
            Err(GeminiError::MissingApiKey)
        ));
        assert!(matches!(
            GeminiClient::new("   "),
            Err(GeminiError::MissingApiKey)
        ));
        assert!(GeminiClient::new("real-key").is_ok());
    }

    #[test]
    fn test_structured_request_wire_shape() {
        let body = build_structured_request(&structured_fixture());
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "Analyze these reviews");
        assert!(json.get("systemInstruction").is_none());

        let config = &json["generationConfig"];
        assert_eq!(config["responseMimeType"], "application/json");
        assert_eq!(config["responseSchema"]["type"], "OBJECT");
        assert_eq!(config["thinkingConfig"]["thinkingBudget"], 32_768);
    }

    #[test]
    fn test_structured_request_without_thinking_budget() {
        let mut req = structured_fixture();
        req.thinking_budget = None;
        let json = serde_json::to_value(build_structured_request(&req)).unwrap();
        assert!(json["generationConfig"].get("thinkingConfig").is_none());
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn test_chat_request_wire_shape() {
        let req = ChatTurnRequest {
            model: "gemini-3-pro-preview".to_string(),
            system_instruction: "You are a helpful data analyst assistant.".to_string(),
            history: vec![ChatTurn::user("first"), ChatTurn::model("reply")],
            message: "second".to_string(),
            thinking_budget: Some(4_096),
        };
        let json = serde_json::to_value(build_chat_request(&req)).unwrap();

        // History comes first, oldest to newest, then the new message.
        let contents = json["contents"].as_array().unwrap();
        assert_eq!(contents.len(), 3);
        assert_eq!(contents[0]["role"], "user");
        assert_eq!(contents[0]["parts"][0]["text"], "first");
        assert_eq!(contents[1]["role"], "model");
        assert_eq!(contents[2]["role"], "user");
        assert_eq!(contents[2]["parts"][0]["text"], "second");

        assert_eq!(
            json["systemInstruction"]["parts"][0]["text"],
            "You are a helpful data analyst assistant."
        );
        assert_eq!(json["generationConfig"]["thinkingConfig"]["thinkingBudget"], 4_096);
        assert!(json["generationConfig"].get("responseSchema").is_none());
    }

    #[test]
    fn test_extract_text_happy_path() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "{\"ok\":true}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response).unwrap(), "{\"ok\":true}");
    }

    #[test]
    fn test_extract_text_no_candidates() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(matches!(
            extract_text(response),
            Err(GeminiError::EmptyResponse)
        ));

        let response: GenerateContentResponse = serde_json::from_str("{}").unwrap();
        assert!(matches!(
            extract_text(response),
            Err(GeminiError::EmptyResponse)
        ));
    }

    #[test]
    fn test_extract_text_candidate_without_text_part() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {"parts": [{}]}}]}"#).unwrap();
        assert!(matches!(
            extract_text(response),
            Err(GeminiError::EmptyResponse)
        ));
    }

    #[test]
    fn test_map_http_error_parses_envelope() {
        let body = r#"{"error": {"code": 429, "message": "Quota exceeded", "status": "RESOURCE_EXHAUSTED"}}"#;
        let err = map_http_error(StatusCode::TOO_MANY_REQUESTS, body.to_string());
        match err {
            GeminiError::Api { status, message } => {
                assert_eq!(status, 429);
                assert_eq!(message, "RESOURCE_EXHAUSTED: Quota exceeded");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_map_http_error_falls_back_to_raw_body() {
        let err = map_http_error(StatusCode::BAD_GATEWAY, "<html>oops</html>".to_string());
        match err {
            GeminiError::Api { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "<html>oops</html>");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
