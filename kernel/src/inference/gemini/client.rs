//! Gemini API HTTP client implementation.

use crate::inference::gemini::mapping::{GeminiResponse, create_request, map_response};
use crate::inference::provider::LLMProvider;
use crate::inference::types::{ChatRequest, ChatResponse, InferenceError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Header carrying the Gemini API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Configuration for the Gemini provider
pub struct GeminiConfig {
    /// API key
    pub api_key: SecretString,
    /// Base URL, e.g. `https://generativelanguage.googleapis.com/v1beta/`
    pub base_url: Url,
}

impl GeminiConfig {
    /// Creates a new config.
    #[must_use]
    pub fn new(api_key: SecretString, base_url: Url) -> Self {
        Self { api_key, base_url }
    }
}

/// Provider for the Gemini `generateContent` endpoint.
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiProvider {
    /// Creates a new Gemini provider.
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn build_api_request(
        &self,
        request: &ChatRequest,
    ) -> Result<reqwest::RequestBuilder, InferenceError> {
        let url = self
            .config
            .base_url
            .join(&format!("models/{}:generateContent", request.model))
            .map_err(|e| InferenceError::ConfigError(format!("Invalid URL join: {e}")))?;

        Ok(self
            .client
            .post(url)
            .header(API_KEY_HEADER, self.config.api_key.expose_secret())
            .header("Content-Type", "application/json")
            .json(&create_request(request)))
    }
}

#[async_trait]
impl LLMProvider for GeminiProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, InferenceError> {
        debug!(model = %request.model, parts = request.messages.len(), "Gemini generateContent request");
        let res = self
            .build_api_request(&request)?
            .send()
            .await
            .map_err(|e| InferenceError::NetworkError(e.to_string()))?;

        match res.status() {
            StatusCode::OK => {
                let body: GeminiResponse = res
                    .json()
                    .await
                    .map_err(|e| InferenceError::ProviderError(format!("Parse error: {e}")))?;
                map_response(body).map_err(InferenceError::EmptyResponse)
            }
            StatusCode::TOO_MANY_REQUESTS => Err(InferenceError::RateLimit),
            StatusCode::BAD_REQUEST => {
                let text = res.text().await.unwrap_or_default();
                if text.contains("exceeds the maximum number of tokens") {
                    Err(InferenceError::ContextLengthExceeded)
                } else {
                    Err(InferenceError::ProviderError(format!("Bad Request: {text}")))
                }
            }
            status => {
                let text = res.text().await.unwrap_or_default();
                Err(InferenceError::ProviderError(format!("HTTP {status}: {text}")))
            }
        }
    }
}
