//! Shared test utilities for integration tests.
//!
//! Provides a scripted model, an in-memory tool host, and engine setup
//! helpers for driving full agent runs without network or processes.

#![allow(dead_code)]

use agent_sdk::{
    AgentConfig, AgentEngine, AgentEngineBuilder, AgentProfile, BoundArguments, GenerationError,
    Generator, ToolCallResult, ToolHost, ToolSpec, TransportError,
};
use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// =============================================================================
// Scripted Generator
// =============================================================================

/// One scripted model reply.
pub enum Reply {
    /// Return this text.
    Text(String),
    /// Fail with a provider error.
    Fail(String),
    /// Never answer (exercises the generation timeout).
    Hang,
}

/// Deterministic generator that replays queued replies and records every prompt.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<Reply>>,
    fallback: Option<String>,
    prompts: Mutex<Vec<Vec<String>>>,
}

impl ScriptedGenerator {
    /// Replays `replies` in order; an exhausted script is a provider error.
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            replies: Mutex::new(replies.into_iter().map(|r| Reply::Text(r.into())).collect()),
            fallback: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Replays `replies` in order.
    pub fn from_replies(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: Mutex::new(replies.into_iter().collect()),
            fallback: None,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Answers every call with `reply`.
    pub fn always(reply: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: Some(reply.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Number of generations requested so far.
    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    /// Prompt parts of every generation, in order.
    pub fn prompts(&self) -> Vec<Vec<String>> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for ScriptedGenerator {
    async fn generate(&self, parts: &[String]) -> Result<String, GenerationError> {
        self.prompts.lock().unwrap().push(parts.to_vec());
        let next = self.replies.lock().unwrap().pop_front();
        match next {
            Some(Reply::Text(text)) => Ok(text),
            Some(Reply::Fail(reason)) => Err(GenerationError::Provider(reason)),
            Some(Reply::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => self
                .fallback
                .clone()
                .ok_or_else(|| GenerationError::Provider("script exhausted".to_string())),
        }
    }
}

// =============================================================================
// In-Memory Tool Host
// =============================================================================

/// How the host answers a `call_tool`.
#[derive(Clone)]
pub enum Behavior {
    /// Return this result.
    Result(ToolCallResult),
    /// Fail the transport (as if the server went away).
    Closed,
}

/// Tool host backed by a fixed tool list and per-tool behaviors.
pub struct InMemoryHost {
    specs: Vec<ToolSpec>,
    behaviors: Mutex<HashMap<String, Behavior>>,
    calls: Mutex<Vec<(String, BoundArguments)>>,
}

impl InMemoryHost {
    /// Advertises `specs`; every tool answers "ok" until configured otherwise.
    pub fn new(specs: Vec<ToolSpec>) -> Self {
        Self {
            specs,
            behaviors: Mutex::new(HashMap::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Sets how `tool` answers.
    pub fn on(self, tool: &str, behavior: Behavior) -> Self {
        self.behaviors
            .lock()
            .unwrap()
            .insert(tool.to_string(), behavior);
        self
    }

    /// Sets a plain text answer for `tool`.
    pub fn answering(self, tool: &str, text: &str) -> Self {
        self.on(tool, Behavior::Result(ToolCallResult::text(text)))
    }

    /// Every call received, in order.
    pub fn calls(&self) -> Vec<(String, BoundArguments)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ToolHost for InMemoryHost {
    async fn list_tools(&self) -> Result<Vec<ToolSpec>, TransportError> {
        Ok(self.specs.clone())
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: &BoundArguments,
    ) -> Result<ToolCallResult, TransportError> {
        self.calls
            .lock()
            .unwrap()
            .push((name.to_string(), arguments.clone()));
        let behavior = self.behaviors.lock().unwrap().get(name).cloned();
        match behavior {
            Some(Behavior::Result(result)) => Ok(result),
            Some(Behavior::Closed) => Err(TransportError::Closed),
            None => Ok(ToolCallResult::text("ok")),
        }
    }
}

// =============================================================================
// Engine Setup
// =============================================================================

/// Builds an engine over the host's discovered tools with default settings.
pub async fn engine(
    profile: AgentProfile,
    generator: Arc<ScriptedGenerator>,
    host: Arc<InMemoryHost>,
) -> AgentEngine {
    engine_with(profile, generator, host, AgentConfig::default()).await
}

/// Builds an engine with explicit settings.
pub async fn engine_with(
    profile: AgentProfile,
    generator: Arc<ScriptedGenerator>,
    host: Arc<InMemoryHost>,
    config: AgentConfig,
) -> AgentEngine {
    AgentEngineBuilder::new()
        .profile(profile)
        .generator(generator)
        .host(host)
        .config(config)
        .discover()
        .await
        .unwrap()
        .build()
        .unwrap()
}

/// Settings with a short generation bound for timeout tests.
pub fn short_timeout() -> AgentConfig {
    AgentConfig::builder()
        .generation_timeout(Duration::from_secs(2))
        .build()
        .unwrap()
}
