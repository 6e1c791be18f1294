use agent_sdk::{RunReport, TerminalState};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, info_span};
use uuid::Uuid;

/// Domain event for audit logging.
/// Structured for JSON serialization to enable machine-readable audit trails.
#[derive(Debug, Serialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum AuditEvent {
    /// The runner connected to a tool host and discovered its tools.
    ToolHostConnected {
        /// Run identifier
        run_id: Uuid,
        /// Server command line
        command: String,
        /// Number of tools advertised
        tools: usize,
        /// Event time
        at: DateTime<Utc>,
    },
    /// A session is about to start.
    RunStarted {
        /// Run identifier
        run_id: Uuid,
        /// Agent profile name
        agent: String,
        /// Provider and model answering generations
        model: String,
        /// The user's request
        request: String,
        /// Event time
        at: DateTime<Utc>,
    },
    /// A session reached its terminal state.
    RunFinished {
        /// Run identifier
        run_id: Uuid,
        /// Agent profile name
        agent: String,
        /// Terminal state
        outcome: TerminalState,
        /// Loop passes used
        iterations: u32,
        /// History entries recorded
        turns: usize,
        /// Event time
        at: DateTime<Utc>,
    },
}

impl AuditEvent {
    /// Builds the finish event for `report`.
    #[must_use]
    pub fn run_finished(run_id: Uuid, agent: &str, report: &RunReport) -> Self {
        Self::RunFinished {
            run_id,
            agent: agent.to_string(),
            outcome: report.terminal_state.clone(),
            iterations: report.iterations,
            turns: report.history.len(),
            at: Utc::now(),
        }
    }
}

/// Logs an audit event to the dedicated audit channel as structured JSON.
/// This uses a specific `target` which can be filtered by the subscriber to redirect to a file.
pub fn log_audit(event: &AuditEvent) {
    let span = info_span!(target: "audit", "audit_event");
    let _enter = span.enter();

    let json = serde_json::to_string(event).unwrap_or_else(|e| format!("{{\"error\": \"{e}\"}}"));
    info!(target: "audit", audit_json = %json, "Audit Event");
}
