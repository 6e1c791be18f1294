//! Tool server launch configuration.

use crate::mcp::StdioServer;
use serde::Deserialize;
use std::time::Duration;

/// Tool servers per agent and the request bound shared by both.
#[derive(Debug, Deserialize, Clone)]
pub struct ToolHostSettings {
    /// Bound on every read while waiting for a tool host response, in seconds.
    pub request_timeout_secs: u64,
    /// Server backing the mail agent.
    pub mail: StdioServer,
    /// Server backing the slides agent.
    pub slides: StdioServer,
}

impl ToolHostSettings {
    /// Request bound as a duration.
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
