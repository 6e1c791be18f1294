/// Audit logging for run events.
pub mod audit;
/// Configuration management for the kernel.
pub mod config;
/// Telemetry setup for logging, the audit trail and tracing.
pub mod telemetry;
