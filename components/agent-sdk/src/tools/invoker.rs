//! Tool invocation across the tool host boundary.

use crate::error::TransportError;
use crate::tools::constants::results::NO_TEXT_RESULT;
use crate::tools::descriptor::{BoundArguments, ContentItem, ToolCallResult};
use crate::tools::ToolHost;
use std::time::Instant;

/// Invokes tools and reduces their results to a single outcome text.
pub struct ToolInvoker;

impl ToolInvoker {
    /// Calls `tool` on the host and returns its outcome text.
    ///
    /// Tool-reported failures come back as ordinary text. Only a failure of
    /// the call itself is an error.
    ///
    /// # Errors
    ///
    /// Returns the host's [`TransportError`] when the call cannot complete.
    pub async fn invoke(
        host: &dyn ToolHost,
        tool: &str,
        arguments: &BoundArguments,
    ) -> Result<String, TransportError> {
        tracing::info!(tool, arguments = %arguments, "Calling tool");
        let start = Instant::now();

        let result = host.call_tool(tool, arguments).await.inspect_err(|e| {
            tracing::error!(tool, error = %e, "Tool call failed at transport level");
        })?;

        let outcome = Self::outcome_text(&result);
        if result.is_error || outcome.to_lowercase().contains("error") {
            tracing::warn!(tool, outcome = %outcome, "Tool reported an error");
        } else {
            tracing::debug!(
                tool,
                duration_ms = start.elapsed().as_millis(),
                "Tool call completed"
            );
        }
        Ok(outcome)
    }

    /// Extracts the first text item, or the fixed sentinel when there is none.
    #[must_use]
    pub fn outcome_text(result: &ToolCallResult) -> String {
        result
            .content
            .iter()
            .find_map(ContentItem::as_text)
            .map_or_else(|| NO_TEXT_RESULT.to_string(), str::to_string)
    }
}
