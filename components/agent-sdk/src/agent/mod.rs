//! Shared agent framework.
//!
//! Concrete agents are thin: each supplies an [`AgentProfile`] and runs on the
//! common engine.

pub mod profile;

pub use profile::AgentProfile;
