//! Prompt building utilities for agents.

use crate::agent::AgentProfile;
use crate::tools::ToolCatalog;
use crate::types::History;

/// Builder for the system prompt and the per-turn prompt parts.
pub struct PromptBuilder;

impl PromptBuilder {
    /// Builds the system prompt for `profile` over the discovered tools.
    #[must_use]
    pub fn system_prompt(profile: &AgentProfile, catalog: &ToolCatalog) -> String {
        let tools = catalog.render();
        let extra_rules: String = profile
            .rules
            .iter()
            .map(|rule| format!("\n- {rule}"))
            .collect();
        let examples = if profile.examples.is_empty() {
            String::new()
        } else {
            format!("\n\nExample Call:\n{}", profile.examples.join("\n"))
        };

        format!(
            r"{persona}

Available tools:
{tools}

Your goal is to follow the user's request step-by-step.
You MUST respond with EXACTLY ONE line in one of these formats (no additional text, explanations, or markdown formatting):

1.  To call a function:
    FUNCTION_CALL: function_name|param1|param2|...
    - Parameters MUST be in the exact order listed in the tool description.
    - Supply every parameter. Parameters are separated by `|`, so a value cannot contain `|`.

2.  When the entire user request is fully completed:
    FINAL_ANSWER: [short summary of the outcome]

Important Rules:
- Call tools sequentially as needed to fulfill the request.
- Check the results of previous calls (provided in the history) before deciding the next step.
- ONLY output `FINAL_ANSWER:` when *all* steps requested by the user are finished.
- If a tool fails, report it using `FINAL_ANSWER: Task failed. Error: [error message from history]`.
- Do not imagine tools that are not listed.{extra_rules}{examples}

Begin!",
            persona = profile.persona,
        )
    }

    /// Builds the ordered prompt parts for the next turn.
    ///
    /// The first turn carries the system prompt and the user request; later
    /// turns add the rendered history.
    #[must_use]
    pub fn parts(
        system_prompt: &str,
        user_request: &str,
        history: &History,
        result_limit: Option<usize>,
    ) -> Vec<String> {
        let mut parts = vec![system_prompt.to_string(), Self::user_query(user_request)];
        if !history.is_empty() {
            parts.push(Self::history_section(&history.lines(result_limit)));
        }
        parts
    }

    /// The user request part.
    #[must_use]
    pub fn user_query(user_request: &str) -> String {
        format!("User Query: {user_request}")
    }

    /// The history part from already-rendered lines.
    #[must_use]
    pub fn history_section(lines: &[String]) -> String {
        format!("History:\n{}\nWhat is the next step?", lines.join("\n"))
    }
}
