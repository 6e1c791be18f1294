//! Provider trait and its adapter to the agent generator.

use crate::inference::types::{ChatRequest, ChatResponse, InferenceError};
use agent_sdk::{GenerationError, Generator};
use async_trait::async_trait;
use tracing::debug;

/// A chat-completion backend.
#[async_trait]
pub trait LLMProvider: Send + Sync {
    /// Executes a chat completion request.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, InferenceError>;
}

/// Exposes an [`LLMProvider`] as the agent's [`Generator`] for one model.
pub struct ProviderGenerator<P> {
    provider: P,
    model: String,
}

impl<P: LLMProvider> ProviderGenerator<P> {
    /// Wraps `provider`, sending every request to `model`.
    pub fn new(provider: P, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
        }
    }

    /// The model requests are sent to.
    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl<P: LLMProvider> Generator for ProviderGenerator<P> {
    async fn generate(&self, parts: &[String]) -> Result<String, GenerationError> {
        let request = ChatRequest::from_parts(self.model.as_str(), parts);
        let response = self.provider.chat(request).await?;
        if let Some(usage) = response.usage {
            debug!(
                model = %self.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "Generation usage"
            );
        }
        Ok(response.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct Recording {
        seen: Mutex<Vec<ChatRequest>>,
        reply: Result<String, InferenceError>,
    }

    #[async_trait]
    impl LLMProvider for Recording {
        async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, InferenceError> {
            self.seen.lock().unwrap().push(request);
            self.reply.clone().map(ChatResponse::new)
        }
    }

    #[tokio::test]
    async fn test_generate_forwards_parts_and_model() {
        let provider = Recording {
            seen: Mutex::new(Vec::new()),
            reply: Ok("FINAL_ANSWER: ok".to_string()),
        };
        let generator = ProviderGenerator::new(provider, "gemini-1.5-flash");
        let parts = vec!["sys".to_string(), "User Query: q".to_string()];

        let text = generator.generate(&parts).await.unwrap();
        assert_eq!(text, "FINAL_ANSWER: ok");

        let seen = generator.provider.seen.lock().unwrap();
        assert_eq!(seen[0].model, "gemini-1.5-flash");
        assert_eq!(seen[0].joined_content(), "sys\nUser Query: q");
    }

    #[tokio::test]
    async fn test_generate_maps_provider_errors() {
        let provider = Recording {
            seen: Mutex::new(Vec::new()),
            reply: Err(InferenceError::NetworkError("connection refused".into())),
        };
        let generator = ProviderGenerator::new(provider, "m");
        let err = generator.generate(&["x".to_string()]).await.unwrap_err();
        assert!(
            matches!(err, GenerationError::Provider(ref msg) if msg.contains("connection refused"))
        );
    }
}
