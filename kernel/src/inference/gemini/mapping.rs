//! Gemini `generateContent` type mapping.
//!
//! Each prompt part becomes one text part of a single user content entry.

use crate::inference::types::{ChatRequest, ChatResponse, Usage};
use serde::{Deserialize, Serialize};

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    /// Conversation contents
    pub contents: Vec<GeminiContent>,
}

/// One content entry.
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct GeminiContent {
    /// Author role (`user` or `model`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Content parts
    #[serde(default)]
    pub parts: Vec<GeminiPart>,
}

/// A content part; only text is used.
#[derive(Debug, Serialize, Deserialize)]
pub struct GeminiPart {
    /// Text payload, absent for non-text parts
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Response body of `generateContent`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiResponse {
    /// Generated candidates
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
    /// Token accounting
    pub usage_metadata: Option<GeminiUsage>,
    /// Present when the prompt itself was blocked
    pub prompt_feedback: Option<GeminiPromptFeedback>,
}

/// One generated candidate.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiCandidate {
    /// Generated content
    #[serde(default)]
    pub content: GeminiContent,
    /// Why generation stopped
    pub finish_reason: Option<String>,
}

/// Token counts reported by Gemini.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiUsage {
    /// Prompt tokens
    #[serde(default)]
    pub prompt_token_count: u32,
    /// Candidate tokens
    #[serde(default)]
    pub candidates_token_count: u32,
    /// Total tokens
    #[serde(default)]
    pub total_token_count: u32,
}

/// Prompt-level safety feedback.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeminiPromptFeedback {
    /// Reason the prompt was blocked
    pub block_reason: Option<String>,
}

/// Creates a Gemini request from internal types.
#[must_use]
pub fn create_request(request: &ChatRequest) -> GeminiRequest {
    GeminiRequest {
        contents: vec![GeminiContent {
            role: Some("user".to_string()),
            parts: request
                .messages
                .iter()
                .map(|m| GeminiPart {
                    text: Some(m.content.clone()),
                })
                .collect(),
        }],
    }
}

/// Maps a Gemini response to internal `ChatResponse`.
///
/// The text is every text part of the first candidate, concatenated.
///
/// # Errors
///
/// Returns a reason when there is no candidate or it carries no text.
pub fn map_response(body: GeminiResponse) -> Result<ChatResponse, String> {
    let usage = body.usage_metadata.map(|u| Usage {
        prompt_tokens: u.prompt_token_count,
        completion_tokens: u.candidates_token_count,
        total_tokens: u.total_token_count,
    });

    let Some(candidate) = body.candidates.into_iter().next() else {
        return Err(match body.prompt_feedback.and_then(|f| f.block_reason) {
            Some(reason) => format!("Prompt blocked: {reason}"),
            None => "No candidates returned".to_string(),
        });
    };

    let texts: Vec<String> = candidate
        .content
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();
    if texts.is_empty() {
        return Err(match candidate.finish_reason {
            Some(reason) => format!("Candidate has no text (finish reason: {reason})"),
            None => "Candidate has no text".to_string(),
        });
    }
    Ok(ChatResponse::new(texts.concat()).with_usage(usage))
}
