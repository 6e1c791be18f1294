//! Wires settings, a model provider and a tool host into one agent run.

use crate::inference::{
    GeminiConfig, GeminiProvider, InferenceError, OpenAIConfig, OpenAIProvider, ProviderGenerator,
};
use crate::infrastructure::audit::{AuditEvent, log_audit};
use crate::infrastructure::config::{InferenceSettings, ProviderKind, Settings, ToolHostSettings};
use crate::mcp::{StdioClient, StdioServer};
use agent_sdk::{AgentConfig, AgentEngineBuilder, AgentProfile, Generator, RunReport, ToolHost};
use anyhow::{Context, Result};
use chrono::Utc;
use reqwest::Url;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

/// The agents the runner can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    /// Sends email through the mail tool server.
    Mail,
    /// Builds slides through the slides tool server.
    Slides,
}

impl AgentKind {
    /// The agent's profile.
    #[must_use]
    pub fn profile(self) -> AgentProfile {
        match self {
            Self::Mail => mailer_agent::profile(),
            Self::Slides => presenter_agent::profile(),
        }
    }

    /// The configured server for this agent.
    #[must_use]
    pub fn server(self, settings: &ToolHostSettings) -> &StdioServer {
        match self {
            Self::Mail => &settings.mail,
            Self::Slides => &settings.slides,
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mail => f.write_str("mail"),
            Self::Slides => f.write_str("slides"),
        }
    }
}

impl FromStr for AgentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "mail" | "mailer" | "gmail" => Ok(Self::Mail),
            "slides" | "presenter" | "keynote" => Ok(Self::Slides),
            other => Err(format!("unknown agent '{other}' (expected 'mail' or 'slides')")),
        }
    }
}

/// Builds the configured provider as a generator.
///
/// # Errors
///
/// Returns a configuration error when the selected provider has no API key
/// or its base URL does not parse.
pub fn build_generator(settings: &InferenceSettings) -> Result<Arc<dyn Generator>, InferenceError> {
    match settings.provider {
        ProviderKind::Gemini => {
            let api_key = settings.gemini_api_key.clone().ok_or_else(|| {
                InferenceError::ConfigError(
                    "inference.gemini_api_key (or GEMINI_API_KEY) is not set".to_string(),
                )
            })?;
            let base_url = parse_base_url(&settings.gemini_base_url)?;
            let provider = GeminiProvider::new(GeminiConfig::new(api_key, base_url));
            Ok(Arc::new(ProviderGenerator::new(provider, &settings.model)))
        }
        ProviderKind::OpenAI => {
            let api_key = settings.openai_api_key.clone().ok_or_else(|| {
                InferenceError::ConfigError("inference.openai_api_key is not set".to_string())
            })?;
            let base_url = parse_base_url(&settings.openai_base_url)?;
            let provider = OpenAIProvider::new(OpenAIConfig::new(api_key, base_url));
            Ok(Arc::new(ProviderGenerator::new(provider, &settings.model)))
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url, InferenceError> {
    // Url::join drops the last segment unless the base ends with a slash
    let normalized = if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    };
    Url::parse(&normalized)
        .map_err(|e| InferenceError::ConfigError(format!("invalid base URL '{raw}': {e}")))
}

/// Everything one run needs besides the request.
pub struct RunSetup {
    /// Run identifier used in audit records.
    pub run_id: Uuid,
    /// Agent profile.
    pub profile: AgentProfile,
    /// Model access.
    pub generator: Arc<dyn Generator>,
    /// Tool access.
    pub host: Arc<dyn ToolHost>,
    /// Human-readable description of the host, for logs.
    pub host_label: String,
    /// Provider and model, for logs.
    pub model_label: String,
    /// Loop settings.
    pub config: AgentConfig,
}

/// Discovers tools, runs one session and records it in the audit trail.
///
/// A blank or missing `query` falls back to the profile's default request.
///
/// # Errors
///
/// Returns an error if tool discovery fails, the engine cannot be built, or the
/// session cannot start. Failures during the run are part of the report.
pub async fn run(setup: RunSetup, query: Option<&str>) -> Result<RunReport> {
    let RunSetup {
        run_id,
        profile,
        generator,
        host,
        host_label,
        model_label,
        config,
    } = setup;
    let agent = profile.name.clone();

    let engine = AgentEngineBuilder::new()
        .profile(profile)
        .generator(generator)
        .host(host)
        .config(config)
        .discover()
        .await
        .with_context(|| format!("Failed to list tools from {host_label}"))?
        .build()
        .context("Failed to build the agent engine")?;

    log_audit(&AuditEvent::ToolHostConnected {
        run_id,
        command: host_label,
        tools: engine.catalog().len(),
        at: Utc::now(),
    });

    let request = engine.profile().resolve_query(query).to_string();
    log_audit(&AuditEvent::RunStarted {
        run_id,
        agent: agent.clone(),
        model: model_label,
        request: request.clone(),
        at: Utc::now(),
    });

    let report = engine.run(&request).await.context("Failed to start the run")?;
    info!(%run_id, agent = %agent, outcome = %report.terminal_state, "Run complete");
    log_audit(&AuditEvent::run_finished(run_id, &agent, &report));
    Ok(report)
}

/// Runs `kind` against its configured tool server and provider.
///
/// # Errors
///
/// Returns an error if the provider is misconfigured, the server cannot be
/// started, or the run cannot begin.
pub async fn run_agent(kind: AgentKind, query: Option<&str>, settings: &Settings) -> Result<RunReport> {
    let generator =
        build_generator(&settings.inference).context("Failed to configure the model provider")?;

    let server = kind.server(&settings.tool_host);
    let host_label = std::iter::once(server.command.as_str())
        .chain(server.args.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join(" ");
    let host = StdioClient::spawn(server, settings.tool_host.request_timeout())
        .await
        .with_context(|| format!("Failed to start tool host `{host_label}`"))?;

    run(
        RunSetup {
            run_id: Uuid::new_v4(),
            profile: kind.profile(),
            generator,
            host: Arc::new(host),
            host_label,
            model_label: format!("{}/{}", settings.inference.provider, settings.inference.model),
            config: settings.agent.clone(),
        },
        query,
    )
    .await
}
