//! `OpenAI`-compatible chat-completions provider.

pub mod client;
pub mod mapping;

pub use client::{OpenAIConfig, OpenAIProvider};
pub use mapping::{OpenAIChatRequest, OpenAIChatResponse, create_request, map_response};
