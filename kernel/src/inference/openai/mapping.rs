//! `OpenAI` API type mapping.
//!
//! Prompt parts are merged into a single user message; the agent protocol
//! treats the whole prompt as one turn.

use crate::inference::types::{ChatRequest, ChatResponse, Message, Usage};
use serde::{Deserialize, Serialize};

/// `OpenAI` API chat request format
#[derive(Debug, Serialize)]
pub struct OpenAIChatRequest {
    /// The model identifier
    pub model: String,
    /// The conversation messages
    pub messages: Vec<Message>,
}

/// `OpenAI` API choice structure
#[derive(Debug, Deserialize)]
pub struct OpenAIChoice {
    /// The generated message
    pub message: OpenAIMessage,
}

/// Assistant message inside a choice; `content` is null for refusals and tool calls.
#[derive(Debug, Deserialize)]
pub struct OpenAIMessage {
    /// Generated text
    #[serde(default)]
    pub content: Option<String>,
}

/// `OpenAI` API usage information
#[derive(Debug, Deserialize)]
pub struct OpenAIUsage {
    /// Number of tokens in the prompt
    #[serde(rename = "prompt_tokens")]
    pub prompt: u32,
    /// Number of tokens in the completion
    #[serde(rename = "completion_tokens")]
    pub completion: u32,
    /// Total number of tokens used
    #[serde(rename = "total_tokens")]
    pub total: u32,
}

/// `OpenAI` API chat response format
#[derive(Debug, Deserialize)]
pub struct OpenAIChatResponse {
    /// The generated completion choices
    #[serde(default)]
    pub choices: Vec<OpenAIChoice>,
    /// Token usage information if available
    pub usage: Option<OpenAIUsage>,
}

/// Maps `OpenAI` API response to internal `ChatResponse`
///
/// # Errors
///
/// Returns an error if no choice carries text.
pub fn map_response(body: OpenAIChatResponse) -> Result<ChatResponse, String> {
    let content = body
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| "No choices returned".to_string())?
        .message
        .content
        .ok_or_else(|| "First choice has no content".to_string())?;

    Ok(ChatResponse::new(content).with_usage(body.usage.map(|u| Usage {
        prompt_tokens: u.prompt,
        completion_tokens: u.completion,
        total_tokens: u.total,
    })))
}

/// Creates an `OpenAI` API request from internal types
#[must_use]
pub fn create_request(request: &ChatRequest) -> OpenAIChatRequest {
    OpenAIChatRequest {
        model: request.model.clone(),
        messages: vec![Message::user(request.joined_content())],
    }
}
