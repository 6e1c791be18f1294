//! Core types for agent sessions: turns, history, and terminal states.

use crate::tools::BoundArguments;
use serde::Serialize;
use std::fmt;

/// How a single model reply was classified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    /// `FUNCTION_CALL: name|arg|...`
    FunctionCall,
    /// `FINAL_ANSWER: message`
    FinalAnswer,
    /// Anything that violates the reply contract, or no reply at all.
    Malformed,
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::FunctionCall => write!(f, "function_call"),
            Classification::FinalAnswer => write!(f, "final_answer"),
            Classification::Malformed => write!(f, "malformed"),
        }
    }
}

/// One iteration's record. Created once, never mutated afterwards.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AgentTurn {
    /// 1-based iteration number.
    pub index: u32,
    /// Raw model completion, empty when generation failed.
    pub raw_model_text: String,
    /// Classification of the completion.
    pub classification: Classification,
    /// Tool that was invoked, if binding succeeded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoked_tool: Option<String>,
    /// Arguments the tool was invoked with.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bound_arguments: Option<BoundArguments>,
    /// Tool result, final message, or failure text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome_text: Option<String>,
    /// Set when the turn ended the run with a failure.
    pub is_error: bool,
}

impl AgentTurn {
    /// A completed tool call.
    pub fn tool_call(
        index: u32,
        raw: impl Into<String>,
        tool: impl Into<String>,
        arguments: BoundArguments,
        outcome: impl Into<String>,
    ) -> Self {
        Self {
            index,
            raw_model_text: raw.into(),
            classification: Classification::FunctionCall,
            invoked_tool: Some(tool.into()),
            bound_arguments: Some(arguments),
            outcome_text: Some(outcome.into()),
            is_error: false,
        }
    }

    /// A final answer.
    pub fn final_answer(index: u32, raw: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            index,
            raw_model_text: raw.into(),
            classification: Classification::FinalAnswer,
            invoked_tool: None,
            bound_arguments: None,
            outcome_text: Some(message.into()),
            is_error: false,
        }
    }

    /// A reply that broke the output contract.
    pub fn malformed(index: u32, raw: impl Into<String>) -> Self {
        Self {
            index,
            raw_model_text: raw.into(),
            classification: Classification::Malformed,
            invoked_tool: None,
            bound_arguments: None,
            outcome_text: None,
            is_error: false,
        }
    }

    /// The model call itself failed or timed out.
    pub fn generation_failure(index: u32, reason: impl Into<String>) -> Self {
        Self {
            index,
            raw_model_text: String::new(),
            classification: Classification::Malformed,
            invoked_tool: None,
            bound_arguments: None,
            outcome_text: Some(reason.into()),
            is_error: true,
        }
    }

    /// A function call that could not be bound or whose transport failed.
    pub fn client_error(
        index: u32,
        raw: impl Into<String>,
        invoked_tool: Option<String>,
        bound_arguments: Option<BoundArguments>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            index,
            raw_model_text: raw.into(),
            classification: Classification::FunctionCall,
            invoked_tool,
            bound_arguments,
            outcome_text: Some(reason.into()),
            is_error: true,
        }
    }

    /// Renders the line the model sees for this turn in later prompts.
    ///
    /// `result_limit` caps the number of characters of a tool result; `None`
    /// reproduces the outcome verbatim.
    #[must_use]
    pub fn history_line(&self, result_limit: Option<usize>) -> String {
        let n = self.index;
        let outcome = self.outcome_text.as_deref().unwrap_or_default();

        match (self.classification, self.is_error) {
            (Classification::FunctionCall, false) => {
                let tool = self.invoked_tool.as_deref().unwrap_or_default();
                let args = self
                    .bound_arguments
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "{}".to_string());
                let result = truncate(outcome, result_limit);
                format!("Iteration {n}: Called {tool}({args}). Result: {result}")
            }
            (Classification::FunctionCall, true) => format!(
                "Iteration {n}: Client Error processing '{}': {outcome}",
                self.raw_model_text
            ),
            (Classification::FinalAnswer, _) => {
                format!("Iteration {n}: Received FINAL_ANSWER: {outcome}")
            }
            (Classification::Malformed, false) => format!(
                "Iteration {n}: Unexpected LLM response format: '{}'",
                self.raw_model_text
            ),
            (Classification::Malformed, true) => {
                format!("Iteration {n}: Failed to get LLM response: {outcome}")
            }
        }
    }
}

fn truncate(text: &str, limit: Option<usize>) -> std::borrow::Cow<'_, str> {
    match limit {
        Some(max) if text.chars().count() > max => {
            std::borrow::Cow::Owned(format!("{}...", text.chars().take(max).collect::<String>()))
        }
        _ => std::borrow::Cow::Borrowed(text),
    }
}

/// Ordered, append-only log of turns; the session's only memory.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct History(Vec<AgentTurn>);

impl History {
    /// Creates an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, turn: AgentTurn) {
        self.0.push(turn);
    }

    /// Number of recorded turns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` before the first turn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Most recent turn.
    #[must_use]
    pub fn last(&self) -> Option<&AgentTurn> {
        self.0.last()
    }

    /// Iterates turns in order.
    pub fn iter(&self) -> std::slice::Iter<'_, AgentTurn> {
        self.0.iter()
    }

    /// Borrows the turns as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[AgentTurn] {
        &self.0
    }

    /// Renders every turn as a history line.
    #[must_use]
    pub fn lines(&self, result_limit: Option<usize>) -> Vec<String> {
        self.0.iter().map(|t| t.history_line(result_limit)).collect()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a AgentTurn;
    type IntoIter = std::slice::Iter<'a, AgentTurn>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Which part of the pipeline ended a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The model call failed or timed out.
    Generation,
    /// The requested call could not be bound to a tool.
    Binding,
    /// The tool-execution channel failed.
    Transport,
}

/// Final classification of a completed run.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum TerminalState {
    /// The model declared the request complete.
    Succeeded {
        /// The final answer message.
        message: String,
    },
    /// A generation, binding or transport failure aborted the run.
    Failed {
        /// Failure origin.
        kind: FailureKind,
        /// Human-readable reason.
        reason: String,
    },
    /// The iteration budget ran out without a final answer.
    BudgetExhausted,
}

impl TerminalState {
    /// Returns `true` for [`TerminalState::Succeeded`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }
}

impl fmt::Display for TerminalState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Succeeded { message } => write!(f, "succeeded: {message}"),
            Self::Failed { kind, reason } => write!(f, "failed ({kind:?}): {reason}"),
            Self::BudgetExhausted => write!(f, "did not complete: iteration budget exhausted"),
        }
    }
}

/// Terminal output of a run: full history plus how it ended.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunReport {
    /// The user request the run served.
    pub user_request: String,
    /// Every turn, in order.
    pub history: History,
    /// How the run ended.
    pub terminal_state: TerminalState,
    /// Number of completed iterations.
    pub iterations: u32,
}

impl RunReport {
    /// Returns `true` when the run ended with a final answer.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.terminal_state.is_success()
    }

    /// The final answer message, if any.
    #[must_use]
    pub fn final_message(&self) -> Option<&str> {
        match &self.terminal_state {
            TerminalState::Succeeded { message } => Some(message),
            _ => None,
        }
    }
}
