//! Protocol and result constants shared across the SDK.
//!
//! Using constants prevents typos and makes refactoring easier.

/// Prefixes of the single-line reply contract.
pub mod protocol {
    /// Prefix for tool call requests.
    pub const FUNCTION_CALL: &str = "FUNCTION_CALL:";

    /// Prefix for the completion message.
    pub const FINAL_ANSWER: &str = "FINAL_ANSWER:";
}

/// Fixed texts recorded for tool results.
pub mod results {
    /// Outcome recorded when a tool returns no text content.
    pub const NO_TEXT_RESULT: &str = "Tool executed, no standard text result.";
}
