//! toolloop kernel - runtime pieces around the agent SDK.
//!
//! This crate provides the concrete model providers, the MCP stdio tool host,
//! configuration, telemetry and the runner that ties them to the agent engine.

#![warn(missing_docs)]
#![warn(clippy::pedantic)]
#![deny(clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// LLM inference providers.
pub mod inference;
/// Infrastructure components (config, telemetry, audit).
pub mod infrastructure;
/// MCP tool host client.
pub mod mcp;
/// Agent run wiring.
pub mod runner;
