//! Agent profiles: the per-agent parts of the system prompt.

use serde::{Deserialize, Serialize};

/// Everything that distinguishes one agent from another.
///
/// The loop, parser and binder are shared; a profile only supplies the
/// persona line, extra rules, example calls and a default request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Short identifier used in logs.
    pub name: String,
    /// Opening paragraph of the system prompt.
    pub persona: String,
    /// Agent-specific rules appended to the common ones.
    #[serde(default)]
    pub rules: Vec<String>,
    /// Example `FUNCTION_CALL` lines shown to the model.
    #[serde(default)]
    pub examples: Vec<String>,
    /// Request used when the caller supplies none.
    #[serde(default)]
    pub default_query: String,
}

impl AgentProfile {
    /// Creates a profile with no rules or examples.
    pub fn new(name: impl Into<String>, persona: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            persona: persona.into(),
            rules: Vec::new(),
            examples: Vec::new(),
            default_query: String::new(),
        }
    }

    /// Adds a rule.
    #[must_use]
    pub fn with_rule(mut self, rule: impl Into<String>) -> Self {
        self.rules.push(rule.into());
        self
    }

    /// Adds an example call line.
    #[must_use]
    pub fn with_example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    /// Sets the default request.
    #[must_use]
    pub fn with_default_query(mut self, query: impl Into<String>) -> Self {
        self.default_query = query.into();
        self
    }

    /// Returns `request` unless it is blank, otherwise the default request.
    #[must_use]
    pub fn resolve_query<'a>(&'a self, request: Option<&'a str>) -> &'a str {
        request
            .map(str::trim)
            .filter(|r| !r.is_empty())
            .unwrap_or(&self.default_query)
    }
}
