//! `OpenAI` API HTTP client implementation.

use crate::inference::openai::mapping::{OpenAIChatResponse, create_request, map_response};
use crate::inference::provider::LLMProvider;
use crate::inference::types::{ChatRequest, ChatResponse, InferenceError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

/// Configuration for the `OpenAI` provider
pub struct OpenAIConfig {
    /// The API key for authenticating with `OpenAI`
    pub api_key: SecretString,
    /// The base URL for the `OpenAI` API
    pub base_url: Url,
}

impl OpenAIConfig {
    /// Creates a new config.
    #[must_use]
    pub fn new(api_key: SecretString, base_url: Url) -> Self {
        Self { api_key, base_url }
    }
}

/// Provider for `OpenAI`-compatible chat-completions endpoints.
pub struct OpenAIProvider {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIProvider {
    /// Creates a new `OpenAI` provider with the given configuration.
    #[must_use]
    pub fn new(config: OpenAIConfig) -> Self {
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
            .join("chat/completions")
            .map_err(|e| InferenceError::ConfigError(format!("Invalid URL join: {e}")))?;

        Ok(self
            .client
            .post(url)
            .header(
                "Authorization",
                format!("Bearer {}", self.config.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&create_request(request)))
    }
}

#[async_trait]
impl LLMProvider for OpenAIProvider {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, InferenceError> {
        debug!(model = %request.model, parts = request.messages.len(), "OpenAI chat request");
        let res = self
            .build_api_request(&request)?
            .send()
            .await
            .map_err(|e| InferenceError::NetworkError(e.to_string()))?;

        match res.status() {
            StatusCode::OK => {
                let body: OpenAIChatResponse = res
                    .json()
                    .await
                    .map_err(|e| InferenceError::ProviderError(format!("Parse error: {e}")))?;
                map_response(body).map_err(InferenceError::EmptyResponse)
            }
            StatusCode::TOO_MANY_REQUESTS => Err(InferenceError::RateLimit),
            StatusCode::BAD_REQUEST => {
                let text = res.text().await.unwrap_or_default();
                if text.contains("context_length_exceeded") {
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
