//! Logging and tracing configuration.

use serde::Deserialize;
use std::path::PathBuf;

/// Telemetry configuration settings.
#[derive(Debug, Deserialize, Clone)]
pub struct TelemetrySettings {
    /// Service name for telemetry.
    pub service_name: String,
    /// Default filter when `RUST_LOG` is unset.
    pub log_level: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
    /// OTLP endpoint for traces.
    pub otlp_endpoint: Option<String>,
    /// Sampling ratio for traces.
    #[serde(default = "default_sampling")]
    pub sampling_ratio: f64,
    /// File receiving the `audit` target as JSON lines.
    pub audit_file: Option<PathBuf>,
}

pub(super) fn default_sampling() -> f64 {
    1.0
}
