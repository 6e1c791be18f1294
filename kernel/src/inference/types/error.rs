//! Error types for inference operations.

use agent_sdk::GenerationError;

/// Errors that can occur during inference operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum InferenceError {
    /// Error from the LLM provider
    #[error("Provider Error: {0}")]
    ProviderError(String),
    /// Rate limit exceeded
    #[error("Rate Limit Exceeded")]
    RateLimit,
    /// Context length exceeded the model's limit
    #[error("Context Length Exceeded")]
    ContextLengthExceeded,
    /// Network error during request
    #[error("Network Error: {0}")]
    NetworkError(String),
    /// Configuration error
    #[error("Configuration Error: {0}")]
    ConfigError(String),
    /// The provider answered but produced no text
    #[error("Empty Response: {0}")]
    EmptyResponse(String),
}

impl From<InferenceError> for GenerationError {
    fn from(err: InferenceError) -> Self {
        match err {
            InferenceError::EmptyResponse(reason) => Self::EmptyResponse(reason),
            other => Self::Provider(other.to_string()),
        }
    }
}
