//! Agent session state.

use crate::tools::ToolCatalog;
use crate::types::{AgentTurn, History, RunReport, TerminalState};
use std::sync::Arc;

/// One run's state, passed by value through [`AgentEngine::step`].
///
/// Created per request and discarded once a terminal state is reached.
///
/// [`AgentEngine::step`]: crate::engine::AgentEngine::step
#[derive(Debug, Clone)]
pub struct AgentSession {
    user_request: String,
    catalog: Arc<ToolCatalog>,
    history: History,
    iteration: u32,
    max_iterations: u32,
    terminal_state: Option<TerminalState>,
}

impl AgentSession {
    /// Starts a session in the running state with an empty history.
    pub fn new(
        user_request: impl Into<String>,
        catalog: Arc<ToolCatalog>,
        max_iterations: u32,
    ) -> Self {
        Self {
            user_request: user_request.into(),
            catalog,
            history: History::new(),
            iteration: 0,
            max_iterations,
            terminal_state: None,
        }
    }

    /// The request being served.
    #[must_use]
    pub fn user_request(&self) -> &str {
        &self.user_request
    }

    /// Tools available to this session.
    #[must_use]
    pub fn catalog(&self) -> &ToolCatalog {
        &self.catalog
    }

    /// Turns recorded so far.
    #[must_use]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Completed loop passes.
    #[must_use]
    pub fn iteration(&self) -> u32 {
        self.iteration
    }

    /// Iteration budget.
    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    /// Terminal state, once reached.
    #[must_use]
    pub fn terminal_state(&self) -> Option<&TerminalState> {
        self.terminal_state.as_ref()
    }

    /// Returns `true` once a terminal state is set.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.terminal_state.is_some()
    }

    /// Appends the pass's turn and advances the iteration counter.
    ///
    /// An explicit terminal state wins; otherwise hitting the budget ends the
    /// run as budget-exhausted.
    pub(crate) fn complete_pass(&mut self, turn: AgentTurn, terminal: Option<TerminalState>) {
        self.history.push(turn);
        self.iteration += 1;
        self.terminal_state = match terminal {
            Some(state) => Some(state),
            None if self.iteration >= self.max_iterations => Some(TerminalState::BudgetExhausted),
            None => None,
        };
    }

    pub(crate) fn exhaust(&mut self) {
        self.terminal_state = Some(TerminalState::BudgetExhausted);
    }

    /// Converts a finished session into its report, or hands back a running one.
    ///
    /// # Errors
    ///
    /// Returns the session unchanged if it has not reached a terminal state.
    pub fn try_into_report(self) -> Result<RunReport, Self> {
        match self.terminal_state {
            Some(terminal_state) => Ok(RunReport {
                user_request: self.user_request,
                history: self.history,
                terminal_state,
                iterations: self.iteration,
            }),
            None => Err(self),
        }
    }
}
