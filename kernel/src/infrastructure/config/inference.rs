//! Model provider configuration.

use secrecy::SecretString;
use serde::Deserialize;
use std::fmt;

/// Which provider answers generations.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    /// Google Gemini `generateContent`.
    #[default]
    Gemini,
    /// Any `OpenAI`-compatible chat-completions endpoint.
    OpenAI,
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gemini => f.write_str("gemini"),
            Self::OpenAI => f.write_str("openai"),
        }
    }
}

/// Inference provider settings.
#[derive(Debug, Deserialize, Clone)]
pub struct InferenceSettings {
    /// Selected provider.
    #[serde(default)]
    pub provider: ProviderKind,
    /// Model identifier sent to the provider.
    pub model: String,
    /// Gemini API key.
    pub gemini_api_key: Option<SecretString>,
    /// Base URL for the Gemini API.
    pub gemini_base_url: String,
    /// `OpenAI` API key.
    pub openai_api_key: Option<SecretString>,
    /// Base URL for the `OpenAI` API.
    pub openai_base_url: String,
}
