//! Response parser for the single-line reply contract.
//!
//! A model reply is either `FUNCTION_CALL: name|arg1|arg2|...` or
//! `FINAL_ANSWER: message`. Anything else is malformed. Arguments are split on
//! `|` with no escaping, so an argument can never contain a literal pipe.

use crate::tools::constants::protocol;
use crate::types::Classification;

/// A tool call requested by the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCall {
    /// Requested tool name.
    pub name: String,
    /// Positional argument tokens, trimmed, in order.
    pub arguments: Vec<String>,
}

/// Classification of one raw completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParsedResponse {
    /// The model wants a tool invoked.
    FunctionCall(FunctionCall),
    /// The model declares the request complete.
    FinalAnswer(String),
    /// The reply violates the output contract; carries the full raw text.
    Malformed(String),
}

impl ParsedResponse {
    /// Returns the coarse classification recorded in history.
    #[must_use]
    pub fn classification(&self) -> Classification {
        match self {
            Self::FunctionCall(_) => Classification::FunctionCall,
            Self::FinalAnswer(_) => Classification::FinalAnswer,
            Self::Malformed(_) => Classification::Malformed,
        }
    }
}

/// Stateless parser for model replies.
pub struct ResponseParser;

impl ResponseParser {
    /// Classifies a raw completion. Never fails.
    #[must_use]
    pub fn parse(raw: &str) -> ParsedResponse {
        let text = Self::strip_fences(raw);

        if let Some(payload) = text.strip_prefix(protocol::FUNCTION_CALL) {
            let mut fields = payload.split('|').map(str::trim);
            let name = fields.next().unwrap_or_default().to_string();
            return ParsedResponse::FunctionCall(FunctionCall {
                name,
                arguments: fields.map(str::to_string).collect(),
            });
        }

        if let Some(payload) = text.strip_prefix(protocol::FINAL_ANSWER) {
            return ParsedResponse::FinalAnswer(payload.trim().to_string());
        }

        ParsedResponse::Malformed(raw.to_string())
    }

    /// Trims the reply and removes one layer of code fencing.
    ///
    /// Triple-backtick fences win over single backticks. A language tag on the
    /// opening fence line is dropped together with the fence.
    #[must_use]
    pub fn strip_fences(raw: &str) -> &str {
        let text = raw.trim();

        if text.len() >= 6 && text.starts_with("```") && text.ends_with("```") {
            let inner = &text[3..text.len() - 3];
            return Self::drop_info_string(inner).trim();
        }

        if text.len() >= 2 && text.starts_with('`') && text.ends_with('`') {
            return text[1..text.len() - 1].trim();
        }

        text
    }

    fn drop_info_string(inner: &str) -> &str {
        match inner.split_once('\n') {
            Some((tag, rest))
                if !tag.trim().is_empty()
                    && tag
                        .trim()
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') =>
            {
                rest
            }
            _ => inner,
        }
    }
}
