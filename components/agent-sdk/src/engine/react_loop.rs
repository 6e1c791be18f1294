//! The generate, parse, act loop.

use crate::agent::AgentProfile;
use crate::config::AgentConfig;
use crate::engine::state::AgentSession;
use crate::error::{AgentError, ConfigError, GenerationError};
use crate::inference::Generator;
use crate::prompt::PromptBuilder;
use crate::tools::{
    ArgumentBinder, ParsedResponse, ResponseParser, ToolCatalog, ToolHost, ToolInvoker,
};
use crate::types::{AgentTurn, FailureKind, RunReport, TerminalState};
use std::sync::Arc;

/// Core engine that drives sessions to a terminal state.
///
/// The engine is immutable; all per-run state lives in [`AgentSession`].
pub struct AgentEngine {
    pub(crate) profile: AgentProfile,
    pub(crate) catalog: Arc<ToolCatalog>,
    pub(crate) system_prompt: String,
    pub(crate) generator: Arc<dyn Generator>,
    pub(crate) host: Arc<dyn ToolHost>,
    pub(crate) config: AgentConfig,
}

impl AgentEngine {
    /// Creates a new agent engine over an already-discovered catalog.
    pub fn new(
        profile: AgentProfile,
        catalog: ToolCatalog,
        generator: Arc<dyn Generator>,
        host: Arc<dyn ToolHost>,
        config: AgentConfig,
    ) -> Self {
        let system_prompt = PromptBuilder::system_prompt(&profile, &catalog);
        Self {
            profile,
            catalog: Arc::new(catalog),
            system_prompt,
            generator,
            host,
            config,
        }
    }

    /// Starts a session for `user_request`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request is blank.
    pub fn start_session(&self, user_request: &str) -> Result<AgentSession, AgentError> {
        if user_request.trim().is_empty() {
            return Err(ConfigError::InvalidRequest(
                "User request cannot be empty".to_string(),
            )
            .into());
        }
        Ok(AgentSession::new(
            user_request,
            Arc::clone(&self.catalog),
            self.config.max_iterations,
        ))
    }

    /// Runs a session until it reaches a terminal state.
    ///
    /// Failures inside the run never surface here; they end up in the report.
    ///
    /// # Errors
    ///
    /// Returns an error only if the session cannot be started.
    pub async fn run(&self, user_request: &str) -> Result<RunReport, AgentError> {
        let mut session = self.start_session(user_request)?;
        tracing::info!(
            target: "audit",
            agent = %self.profile.name,
            request = %user_request,
            tools = self.catalog.len(),
            max_iterations = self.config.max_iterations,
            "Run started"
        );

        loop {
            session = self.step(session).await;
            match session.try_into_report() {
                Ok(report) => {
                    self.log_report(&report);
                    return Ok(report);
                }
                Err(running) => session = running,
            }
        }
    }

    /// Performs one loop pass. A finished session is returned untouched.
    pub async fn step(&self, mut session: AgentSession) -> AgentSession {
        if session.is_finished() {
            return session;
        }
        if session.iteration() >= session.max_iterations() {
            session.exhaust();
            return session;
        }

        let index = session.iteration() + 1;
        tracing::info!(
            iteration = index,
            max_iterations = session.max_iterations(),
            "Starting iteration"
        );

        let parts = PromptBuilder::parts(
            &self.system_prompt,
            session.user_request(),
            session.history(),
            self.config.history_result_limit,
        );
        if self.config.verbose {
            tracing::debug!(iteration = index, parts = ?parts, "Prompt parts");
        }

        let (turn, terminal) = match self.generate(&parts).await {
            Ok(raw) => self.act(index, session.catalog(), raw).await,
            Err(e) => {
                tracing::error!(iteration = index, error = %e, "Failed to get LLM response");
                (
                    AgentTurn::generation_failure(index, e.to_string()),
                    Some(TerminalState::Failed {
                        kind: FailureKind::Generation,
                        reason: e.to_string(),
                    }),
                )
            }
        };

        match serde_json::to_string(&turn) {
            Ok(json) => tracing::info!(target: "audit", turn = %json, "Turn recorded"),
            Err(e) => tracing::error!(iteration = index, error = %e, "Failed to serialize turn"),
        }
        session.complete_pass(turn, terminal);
        session
    }

    async fn generate(&self, parts: &[String]) -> Result<String, GenerationError> {
        let bound = self.config.generation_timeout;
        match tokio::time::timeout(bound, self.generator.generate(parts)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout { elapsed: bound }),
        }
    }

    async fn act(
        &self,
        index: u32,
        catalog: &ToolCatalog,
        raw: String,
    ) -> (AgentTurn, Option<TerminalState>) {
        tracing::debug!(iteration = index, raw = %raw, "LLM raw response");

        match ResponseParser::parse(&raw) {
            ParsedResponse::FinalAnswer(message) => {
                tracing::info!(iteration = index, message = %message, "Received final answer");
                (
                    AgentTurn::final_answer(index, raw, message.clone()),
                    Some(TerminalState::Succeeded { message }),
                )
            }
            ParsedResponse::Malformed(raw) => {
                tracing::warn!(iteration = index, raw = %raw, "Unexpected LLM response format");
                (AgentTurn::malformed(index, raw), None)
            }
            ParsedResponse::FunctionCall(call) => {
                let (tool, arguments) = match ArgumentBinder::bind(&call, catalog) {
                    Ok(bound) => bound,
                    Err(e) => {
                        tracing::error!(iteration = index, tool = %call.name, error = %e, "Binding failed");
                        return (
                            AgentTurn::client_error(index, raw, None, None, e.to_string()),
                            Some(TerminalState::Failed {
                                kind: FailureKind::Binding,
                                reason: e.to_string(),
                            }),
                        );
                    }
                };

                match ToolInvoker::invoke(self.host.as_ref(), &tool.name, &arguments).await {
                    Ok(outcome) => (
                        AgentTurn::tool_call(index, raw, tool.name.clone(), arguments, outcome),
                        None,
                    ),
                    Err(e) => (
                        AgentTurn::client_error(
                            index,
                            raw,
                            Some(tool.name.clone()),
                            Some(arguments),
                            e.to_string(),
                        ),
                        Some(TerminalState::Failed {
                            kind: FailureKind::Transport,
                            reason: e.to_string(),
                        }),
                    ),
                }
            }
        }
    }

    fn log_report(&self, report: &RunReport) {
        match serde_json::to_string(report) {
            Ok(json) => tracing::info!(target: "audit", report = %json, "Run finished"),
            Err(e) => tracing::error!(error = %e, "Failed to serialize run report"),
        }
        match &report.terminal_state {
            TerminalState::Succeeded { message } => {
                tracing::info!(agent = %self.profile.name, iterations = report.iterations, message = %message, "Agent succeeded");
            }
            TerminalState::Failed { kind, reason } => {
                tracing::error!(agent = %self.profile.name, iterations = report.iterations, kind = ?kind, reason = %reason, "Agent failed");
            }
            TerminalState::BudgetExhausted => {
                tracing::warn!(agent = %self.profile.name, iterations = report.iterations, "Agent reached maximum iterations without completing");
            }
        }
    }

    /// The agent profile.
    #[must_use]
    pub fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    /// Tools discovered for this engine.
    #[must_use]
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// The fixed system prompt sent on every turn.
    #[must_use]
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }

    /// Engine configuration.
    #[must_use]
    pub fn config(&self) -> &AgentConfig {
        &self.config
    }
}
