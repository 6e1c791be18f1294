//! Type definitions for inference operations.
//!
//! This module contains shared types used across all LLM providers.

pub mod error;
pub mod message;
pub mod request;
pub mod response;

pub use error::InferenceError;
pub use message::{Message, Role};
pub use request::ChatRequest;
pub use response::{ChatResponse, Usage};
