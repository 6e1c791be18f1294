//! Model Context Protocol tool hosts.
//!
//! The client speaks JSON-RPC 2.0 over a line-delimited byte stream, usually the
//! stdin/stdout of a spawned server process, and implements
//! [`agent_sdk::ToolHost`] on top of `tools/list` and `tools/call`.

pub mod client;
pub mod protocol;

pub use client::{CLIENT_NAME, McpClient, StdioClient, StdioServer};
