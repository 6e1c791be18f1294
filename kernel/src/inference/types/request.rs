//! Request types for inference operations.

use crate::inference::types::message::Message;

/// Request for a chat completion.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// The model to use for completion
    pub model: String,
    /// The conversation messages
    pub messages: Vec<Message>,
}

impl ChatRequest {
    /// Creates a new chat request
    #[must_use]
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
        }
    }

    /// Creates a request with one user message per prompt part, in order.
    #[must_use]
    pub fn from_parts(model: impl Into<String>, parts: &[String]) -> Self {
        Self::new(model, parts.iter().map(Message::user).collect())
    }

    /// All message contents joined by newlines.
    #[must_use]
    pub fn joined_content(&self) -> String {
        self.messages
            .iter()
            .map(|m| m.content.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}
