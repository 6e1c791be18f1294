//! Agent engine module with the turn loop, session state, and builder pattern.

pub mod builder;
pub mod react_loop;
pub mod state;

pub use builder::AgentEngineBuilder;
pub use react_loop::AgentEngine;
pub use state::AgentSession;
