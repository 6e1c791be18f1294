//! Error types for the agent SDK.
//!
//! This module provides a structured error hierarchy using `thiserror`.
//! Only session setup surfaces [`AgentError`] to callers; failures inside a
//! running session are recorded in the history and the terminal state instead.

use crate::tools::ParamType;
use std::time::Duration;
use thiserror::Error;

/// Top-level error type for agent operations.
#[derive(Error, Debug)]
pub enum AgentError {
    /// Error talking to the tool host.
    #[error("Tool host transport failed: {0}")]
    Transport(#[from] TransportError),

    /// Error related to configuration or the session request.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Errors produced by the model boundary.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GenerationError {
    /// The generation call did not finish within its bound.
    #[error("generation timed out after {elapsed:?}")]
    Timeout {
        /// The configured bound that was exceeded.
        elapsed: Duration,
    },

    /// The model provider returned an error.
    #[error("provider error: {0}")]
    Provider(String),

    /// The provider answered but no text could be extracted.
    #[error("empty response: {0}")]
    EmptyResponse(String),
}

/// Binding-time contract violations for a `FUNCTION_CALL` request.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BindError {
    /// No callable tool carries the requested name.
    #[error("Unknown tool '{name}' requested by LLM.")]
    UnknownTool {
        /// Requested tool name.
        name: String,
    },

    /// The number of positional arguments does not match the tool's parameters.
    #[error(
        "Parameter count mismatch for tool '{tool}'. Expected {expected} ({}), got {actual}.",
        .parameters.join(", ")
    )]
    ArityMismatch {
        /// Tool name.
        tool: String,
        /// Declared parameter count.
        expected: usize,
        /// Supplied token count.
        actual: usize,
        /// Declared parameter names, in order.
        parameters: Vec<String>,
    },

    /// A positional argument could not be coerced to its declared type.
    #[error("Could not convert parameter '{parameter}' (value: '{value}') to expected type '{expected}'.")]
    TypeCoercion {
        /// Offending parameter name.
        parameter: String,
        /// Raw token supplied by the model.
        value: String,
        /// Declared type.
        expected: ParamType,
    },
}

/// Failures of the tool-execution channel itself.
#[derive(Error, Debug)]
pub enum TransportError {
    /// I/O failure on the underlying channel.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The remote side closed the channel.
    #[error("tool host closed the connection")]
    Closed,

    /// No response arrived within the request bound.
    #[error("tool host did not answer '{method}' within {timeout:?}")]
    Timeout {
        /// Request method that timed out.
        method: String,
        /// Bound that was exceeded.
        timeout: Duration,
    },

    /// The peer sent something that is not a valid protocol message.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The tool host rejected the request.
    #[error("tool host returned error {code}: {message}")]
    Remote {
        /// Error code reported by the host.
        code: i64,
        /// Error message reported by the host.
        message: String,
    },
}

/// Errors related to configuration and session setup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The user request is empty.
    #[error("Invalid user request: {0}")]
    InvalidRequest(String),

    /// Missing required configuration.
    #[error("Missing configuration: {key}")]
    MissingConfiguration {
        /// The configuration key that is missing.
        key: String,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration for '{key}': {value}")]
    InvalidConfiguration {
        /// The configuration key.
        key: String,
        /// The invalid value.
        value: String,
    },
}
