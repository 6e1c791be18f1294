//! Gemini `generateContent` provider.

pub mod client;
pub mod mapping;

pub use client::{API_KEY_HEADER, GeminiConfig, GeminiProvider};
pub use mapping::{GeminiRequest, GeminiResponse, create_request, map_response};
