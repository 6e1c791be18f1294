//! LLM inference providers.

pub mod gemini;
pub mod openai;
pub mod provider;
pub mod types;

pub use gemini::{GeminiConfig, GeminiProvider};
pub use openai::{OpenAIConfig, OpenAIProvider};
pub use provider::{LLMProvider, ProviderGenerator};
pub use types::*;
