//! Mailer Agent - sends email through a mail tool host.
//!
//! The agent itself is only a profile; the shared engine in `agent-sdk` does
//! the work. The tool contracts it expects are listed in [`tool_specs`].

mod prompt;

use agent_sdk::{AgentProfile, ParamType, ToolSpec};

/// Agent name used in logs and on the command line.
pub const NAME: &str = "mailer";

/// Tool names exposed by the mail host.
pub mod tools {
    /// Sends one message.
    pub const SEND_EMAIL: &str = "send_email";
    /// Lists messages matching a query.
    pub const LIST_EMAILS: &str = "list_emails";
    /// Fetches one message by id.
    pub const GET_EMAIL: &str = "get_email";
}

/// Builds the mailer profile.
#[must_use]
pub fn profile() -> AgentProfile {
    let mut profile = AgentProfile::new(NAME, prompt::PERSONA);
    for rule in prompt::RULES {
        profile = profile.with_rule(*rule);
    }
    for example in prompt::EXAMPLES {
        profile = profile.with_example(*example);
    }
    profile.with_default_query(prompt::DEFAULT_QUERY)
}

/// The tool contracts the mail host advertises.
#[must_use]
pub fn tool_specs() -> Vec<ToolSpec> {
    vec![
        ToolSpec::with_properties(
            tools::SEND_EMAIL,
            "Sends an email using the authenticated Gmail account and returns the Message ID.",
            [
                ("to", ParamType::String),
                ("subject", ParamType::String),
                ("body", ParamType::String),
            ],
        ),
        ToolSpec::with_properties(
            tools::LIST_EMAILS,
            "Lists email messages matching a query.",
            [("query", ParamType::String), ("max_results", ParamType::Integer)],
        ),
        ToolSpec::with_properties(
            tools::GET_EMAIL,
            "Gets the content of a specific email message by ID.",
            [("message_id", ParamType::String), ("body_format", ParamType::String)],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use agent_sdk::{ArgumentBinder, FunctionCall, PromptBuilder, ToolCatalog};
    use serde_json::json;

    #[test]
    fn test_profile_prompt_mentions_send_email() {
        let catalog = ToolCatalog::from_specs(tool_specs());
        let system = PromptBuilder::system_prompt(&profile(), &catalog);

        assert!(system.starts_with(prompt::PERSONA));
        assert!(system.contains("1. send_email(to: string, subject: string, body: string)"));
        assert!(system.contains("- Use the `send_email` tool"));
        assert!(system.contains("Example Call:\nFUNCTION_CALL: send_email|"));
    }

    #[test]
    fn test_send_email_binds_in_declared_order() {
        let catalog = ToolCatalog::from_specs(tool_specs());
        let call = FunctionCall {
            name: tools::SEND_EMAIL.to_string(),
            arguments: vec!["a@b.com".into(), "Hi".into(), "Body text".into()],
        };
        let (_, args) = ArgumentBinder::bind(&call, &catalog).unwrap();
        assert_eq!(
            args.into_value(),
            json!({"to": "a@b.com", "subject": "Hi", "body": "Body text"})
        );
    }

    #[test]
    fn test_default_query() {
        assert!(profile().resolve_query(None).contains("MCP Agent Test"));
    }
}
