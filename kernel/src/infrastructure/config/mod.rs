//! Configuration management for the toolloop kernel.
//!
//! Settings are layered: built-in defaults, then an optional `toolloop.toml`
//! (or `.yaml`/`.json`) in the working directory, then environment variables
//! prefixed with `TOOLLOOP` using `__` as the section separator, e.g.
//! `TOOLLOOP__INFERENCE__PROVIDER=openai` or `TOOLLOOP__AGENT__MAX_ITERATIONS=8`.
//! A bare `GEMINI_API_KEY` is honored as the default Gemini key.
//!
//! # Example
//!
//! ```no_run
//! use toolloop_kernel::infrastructure::config::Settings;
//!
//! let settings = Settings::new().expect("Failed to load configuration");
//! println!("{}", settings.inference.model);
//! ```

pub mod inference;
pub mod telemetry;
pub mod tool_host;

pub use inference::{InferenceSettings, ProviderKind};
pub use telemetry::TelemetrySettings;
pub use tool_host::ToolHostSettings;

use agent_sdk::AgentConfig;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "TOOLLOOP";
/// Fallback variable for the Gemini key.
pub const GEMINI_KEY_VAR: &str = "GEMINI_API_KEY";

/// Top-level configuration for the kernel.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    /// Loop settings handed to the engine.
    #[serde(default)]
    pub agent: AgentConfig,
    /// Inference provider settings.
    pub inference: InferenceSettings,
    /// Tool server settings.
    pub tool_host: ToolHostSettings,
    /// Telemetry settings.
    pub telemetry: TelemetrySettings,
}

impl Settings {
    /// Loads settings from `toolloop.*` in the working directory and the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be built or deserialized.
    pub fn new() -> Result<Self, ConfigError> {
        Self::load(Some(Path::new("toolloop")), None)
    }

    /// Loads settings from an optional file stem and an explicit environment.
    ///
    /// `env` replaces the process environment when given.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be built or deserialized.
    pub fn load(
        file: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let gemini_key = match &env {
            Some(vars) => vars.get(GEMINI_KEY_VAR).cloned(),
            None => std::env::var(GEMINI_KEY_VAR).ok(),
        };

        let mut builder = Config::builder()
            .set_default("inference.provider", "gemini")?
            .set_default("inference.model", "gemini-1.5-flash")?
            .set_default(
                "inference.gemini_base_url",
                "https://generativelanguage.googleapis.com/v1beta/",
            )?
            .set_default("inference.openai_base_url", "https://api.openai.com/v1/")?
            .set_default("tool_host.request_timeout_secs", 30)?
            .set_default("tool_host.mail.command", "python3")?
            .set_default("tool_host.mail.args", vec!["gmail_mcp_server.py"])?
            .set_default("tool_host.slides.command", "python3")?
            .set_default("tool_host.slides.args", vec!["mac_keynote_server.py"])?
            .set_default("telemetry.service_name", "toolloop-kernel")?
            .set_default("telemetry.log_level", "info")?
            .set_default("telemetry.sampling_ratio", 1.0)?;

        if let Some(key) = gemini_key {
            builder = builder.set_default("inference.gemini_api_key", key)?;
        }
        if let Some(stem) = file {
            builder = builder.add_source(File::with_name(&stem.to_string_lossy()).required(false));
        }

        builder
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true)
                    .list_separator(" ")
                    .with_list_parse_key("tool_host.mail.args")
                    .with_list_parse_key("tool_host.slides.args")
                    .source(env),
            )
            .build()?
            .try_deserialize()
    }
}
