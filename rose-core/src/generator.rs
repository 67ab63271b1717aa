//! Text-generation capability and its Gemini-backed implementation.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;

use crate::{config::GeneratorConfig, error::GenerateError};

/// What to ask the text-generation service for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    /// Requested output mode, e.g. `application/json` for a structured object.
    pub response_mime_type: String,
}

impl Default for GenerationRequest {
    fn default() -> Self {
        Self {
            prompt: "Write a short, heart-touching, and romantic Rose Day message specifically for a guy \
                     named Rohit. The tone should be soft and poetic. Return as JSON with keys: title, \
                     content, author."
                .to_string(),
            response_mime_type: "application/json".to_string(),
        }
    }
}

/// Anything that can turn a [`GenerationRequest`] into text.
///
/// The message panel only depends on this trait, so tests can swap in a
/// local fake instead of the network.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError>;
}

/// Client for the Gemini `generateContent` REST endpoint.
#[derive(Clone, Debug)]
pub struct GeminiClient {
    http: Client,
    cfg: GeneratorConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate; empty if there is none.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default()
    }
}

impl GeminiClient {
    pub fn new(cfg: GeneratorConfig) -> Result<Self, GenerateError> {
        let http = Client::builder().timeout(cfg.timeout).build()?;
        Ok(Self { http, cfg })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.cfg.base_url.trim_end_matches('/'),
            self.cfg.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerateError> {
        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }],
            }],
            "generationConfig": {
                "responseMimeType": request.response_mime_type,
            },
        });

        tracing::debug!(model = %self.cfg.model, "sending generateContent request");
        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.cfg.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GenerateError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        Ok(payload.text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{body_partial_json, header, method, path},
    };

    fn client_for(server: &MockServer) -> GeminiClient {
        GeminiClient::new(GeneratorConfig {
            base_url: server.uri(),
            api_key: "test-key".to_string(),
            ..GeneratorConfig::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn sends_prompt_and_json_mode_and_returns_candidate_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1beta/models/gemini-3-flash-preview:generateContent"))
            .and(header("x-goog-api-key", "test-key"))
            .and(body_partial_json(json!({
                "generationConfig": { "responseMimeType": "application/json" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "candidates": [{
                    "content": {
                        "role": "model",
                        "parts": [
                            { "text": "{\"title\":\"T\"," },
                            { "text": "\"content\":\"C\",\"author\":\"A\"}" }
                        ]
                    }
                }]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = client_for(&server)
            .generate(&GenerationRequest::default())
            .await
            .unwrap();
        assert_eq!(text, r#"{"title":"T","content":"C","author":"A"}"#);
    }

    #[tokio::test]
    async fn missing_candidates_yield_empty_text() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let text = client_for(&server)
            .generate(&GenerationRequest::default())
            .await
            .unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("API key not valid"))
            .mount(&server)
            .await;

        let err = client_for(&server)
            .generate(&GenerationRequest::default())
            .await
            .unwrap_err();
        match err {
            GenerateError::Status { status, body } => {
                assert_eq!(status, 403);
                assert_eq!(body, "API key not valid");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn unreachable_service_is_a_network_error() {
        let client = GeminiClient::new(GeneratorConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            ..GeneratorConfig::default()
        })
        .unwrap();

        let err = client.generate(&GenerationRequest::default()).await.unwrap_err();
        assert!(matches!(err, GenerateError::Network(_)));
    }
}
