//! REST backend for the hosted Gemini `generateContent` endpoint.
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::AssistantConfig;
use crate::constants::LOG_TARGET_INSIGHT;

use super::backend::InsightBackend;
use super::types::InsightError;
use super::wire::{GenerateRequest, GenerateResponse};

pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default = "AssistantConfig::default_text_model")]
    pub text_model: String,
    #[serde(default = "AssistantConfig::default_image_model")]
    pub image_model: String,
    #[serde(default = "GeminiConfig::default_timeout_ms")]
    pub timeout_ms: u64,
}

impl GeminiConfig {
    #[must_use]
    pub const fn default_timeout_ms() -> u64 {
        DEFAULT_TIMEOUT_MS
    }

    /// Read `GEMINI_API_KEY` (falling back to `API_KEY`) and
    /// `GEMINI_BASE_URL` from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.trim().is_empty())
            .or_else(|| std::env::var("API_KEY").ok());
        Self {
            api_key,
            base_url: std::env::var("GEMINI_BASE_URL").ok(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Model names for a [`DealAssistant`](super::DealAssistant) using this client.
    #[must_use]
    pub fn assistant_config(&self) -> AssistantConfig {
        AssistantConfig {
            text_model: self.text_model.clone(),
            image_model: self.image_model.clone(),
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: None,
            text_model: AssistantConfig::default_text_model(),
            image_model: AssistantConfig::default_image_model(),
            timeout_ms: Self::default_timeout_ms(),
        }
    }
}

pub struct GeminiClient {
    api_key: String,
    base_url: String,
    timeout_ms: u64,
    client: reqwest::Client,
}

impl GeminiClient {
    /// Build a client.
    ///
    /// # Errors
    ///
    /// Returns [`InsightError::MissingApiKey`] without a usable key and
    /// [`InsightError::Config`] for a zero timeout or a failed HTTP client.
    pub fn new(config: &GeminiConfig) -> Result<Self, InsightError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
            .ok_or(InsightError::MissingApiKey)?
            .to_string();

        if config.timeout_ms == 0 {
            return Err(InsightError::Config(
                "gemini timeout must be greater than 0".to_string(),
            ));
        }

        let base_url = config
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(DEFAULT_GEMINI_BASE_URL)
            .trim_end_matches('/')
            .to_string();

        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_millis(config.timeout_ms));
        let client = builder
            .build()
            .map_err(|error| InsightError::Config(error.to_string()))?;

        Ok(Self {
            api_key,
            base_url,
            timeout_ms: config.timeout_ms,
            client,
        })
    }

    fn endpoint(&self, model: &str) -> String {
        let resource = if model.starts_with("models/") {
            model.to_string()
        } else {
            format!("models/{model}")
        };
        format!("{}/{resource}:generateContent", self.base_url)
    }
}

#[async_trait(?Send)]
impl InsightBackend for GeminiClient {
    async fn generate_content(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateResponse, InsightError> {
        let endpoint = self.endpoint(&request.model);
        log::debug!(
            target: LOG_TARGET_INSIGHT,
            "POST {endpoint} (located: {})",
            request.location.is_some()
        );

        let response = self
            .client
            .post(&endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request.to_body())
            .send()
            .await
            .map_err(|error| {
                if error.is_timeout() {
                    InsightError::Timeout(format!(
                        "Gemini request timed out after {} ms",
                        self.timeout_ms
                    ))
                } else {
                    InsightError::Transport(error.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|error| InsightError::Transport(error.to_string()))?;

        if status.as_u16() == 401 || status.as_u16() == 403 {
            return Err(InsightError::Auth(
                "Gemini rejected the API key. Check GEMINI_API_KEY".to_string(),
            ));
        }
        if !status.is_success() {
            return Err(InsightError::Status {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|error| {
            InsightError::InvalidResponse(format!("failed to parse Gemini response JSON: {error}"))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::insight::DealAssistant;
    use crate::insight::types::GeoPoint;
    use crate::product::DealCatalog;
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;

    fn client_for(server: &MockServer) -> GeminiClient {
        let config = GeminiConfig {
            base_url: Some(format!("{}/v1beta", server.base_url())),
            timeout_ms: 5_000,
            ..GeminiConfig::default()
        }
        .with_api_key("test-key");
        GeminiClient::new(&config).expect("client should build")
    }

    #[test]
    fn missing_key_is_rejected() {
        let result = GeminiClient::new(&GeminiConfig::default());
        assert!(matches!(result, Err(InsightError::MissingApiKey)));
        let blank = GeminiConfig::default().with_api_key("   ");
        assert!(matches!(
            GeminiClient::new(&blank),
            Err(InsightError::MissingApiKey)
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = GeminiConfig {
            timeout_ms: 0,
            ..GeminiConfig::default().with_api_key("k")
        };
        assert!(matches!(
            GeminiClient::new(&config),
            Err(InsightError::Config(_))
        ));
    }

    #[tokio::test]
    async fn located_question_sends_maps_tool_and_parses_sources() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-2.5-flash:generateContent")
                .query_param("key", "test-key")
                .header("content-type", "application/json")
                .body_contains("\"googleMaps\"")
                .body_contains("\"latitude\":37.5");
            then.status(200).json_body(json!({
                "candidates": [{
                    "content": { "parts": [{ "text": "The Daily Grind has it." }] },
                    "groundingMetadata": { "groundingChunks": [
                        { "maps": { "title": "The Daily Grind", "uri": "https://maps/1" } },
                        { "web": { "title": "Review", "uri": "https://web/1" } }
                    ]}
                }]
            }));
        });

        let assistant = DealAssistant::new(client_for(&server));
        let product = DealCatalog::load_from_static().unwrap().product;
        let insight = assistant
            .ask_about_deal("Nearby?", &product, Some(GeoPoint::new(37.5, -122.0)))
            .await;

        mock.assert();
        assert_eq!(insight.text, "The Daily Grind has it.");
        assert_eq!(insight.source_count(), 2);
    }

    #[tokio::test]
    async fn auth_failure_maps_to_auth_error() {
        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(POST);
            then.status(403).json_body(json!({ "error": { "message": "denied" } }));
        });

        let result = client_for(&server)
            .generate_content(GenerateRequest::new("gemini-2.5-flash", "hi"))
            .await;
        assert!(matches!(result, Err(InsightError::Auth(_))));
    }

    #[tokio::test]
    async fn server_error_keeps_status_and_body() {
        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(POST);
            then.status(503).body("overloaded");
        });

        let result = client_for(&server)
            .generate_content(GenerateRequest::new("models/gemini-2.5-flash", "hi"))
            .await;
        assert_eq!(
            result,
            Err(InsightError::Status {
                status: 503,
                body: "overloaded".to_string()
            })
        );
    }

    #[tokio::test]
    async fn malformed_json_is_invalid_response() {
        let server = MockServer::start();
        let _mock = server.mock(|when, then| {
            when.method(POST);
            then.status(200).body("not json");
        });

        let result = client_for(&server)
            .generate_content(GenerateRequest::new("gemini-2.5-flash", "hi"))
            .await;
        assert!(matches!(result, Err(InsightError::InvalidResponse(_))));
    }

    #[tokio::test]
    async fn image_reply_becomes_data_uri() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/v1beta/models/gemini-2.5-flash-image:generateContent");
            then.status(200).json_body(json!({
                "candidates": [{ "content": { "parts": [
                    { "inlineData": { "mimeType": "image/png", "data": "iVBORw0KGgo=" } }
                ]}}]
            }));
        });

        let assistant = DealAssistant::new(client_for(&server));
        let image = assistant.generate_image("blender").await;
        mock.assert();
        assert_eq!(
            image.map(|image| image.to_uri()).as_deref(),
            Some("data:image/png;base64,iVBORw0KGgo=")
        );
    }
}
