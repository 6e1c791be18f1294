//! Agent SDK - Shared library for building tool-calling agents.
//!
//! An agent gives a language model a numbered catalog of tools, asks it for
//! exactly one line per turn, and acts on that line until the model declares
//! completion or the iteration budget runs out.
//!
//! # Features
//!
//! - **Error Handling**: Structured error hierarchy using `thiserror`
//! - **Configuration**: Environment-based configuration with validation
//! - **Tool System**: Catalog rendering, strict reply parsing, positional binding
//! - **Agent Engine**: Step-wise turn loop with explicit session state
//! - **Prompt Building**: System prompt and per-turn history prompts
//!
//! # Example
//!
//! ```rust,no_run
//! use agent_sdk::{AgentConfig, AgentEngineBuilder, AgentProfile, Generator, ToolHost};
//! use std::sync::Arc;
//!
//! # async fn example(
//! #     model: Arc<dyn Generator>,
//! #     host: Arc<dyn ToolHost>,
//! # ) -> Result<(), Box<dyn std::error::Error>> {
//! let config = AgentConfig::builder().max_iterations(5).build()?;
//!
//! let engine = AgentEngineBuilder::new()
//!     .profile(AgentProfile::new("demo", "You are a helpful agent."))
//!     .generator(model)
//!     .host(host)
//!     .config(config)
//!     .discover()
//!     .await?
//!     .build()?;
//!
//! let report = engine.run("Open Keynote").await?;
//! println!("{}", report.terminal_state);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]

pub mod agent;
pub mod config;
pub mod engine;
pub mod error;
pub mod inference;
pub mod prompt;
pub mod tools;
pub mod types;

// Re-export commonly used types
pub use agent::AgentProfile;
pub use config::{AgentConfig, AgentConfigBuilder};
pub use engine::{AgentEngine, AgentEngineBuilder, AgentSession};
pub use error::{AgentError, BindError, ConfigError, GenerationError, TransportError};
pub use inference::Generator;
pub use prompt::PromptBuilder;
pub use tools::{
    ArgumentBinder, BoundArguments, ContentItem, FunctionCall, ParamType, ParsedResponse,
    ResponseParser, ToolCallResult, ToolCatalog, ToolDescriptor, ToolHost, ToolInvoker, ToolSpec,
};
pub use types::{AgentTurn, Classification, FailureKind, History, RunReport, TerminalState};

/// Version of the agent SDK.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
