//! Configuration management for agents.
//!
//! Provides a strongly-typed configuration system with environment variable
//! support and sensible defaults.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Environment variable prefix for agent settings.
pub const ENV_PREFIX: &str = "TOOLLOOP_AGENT_";

/// Agent configuration settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Maximum number of loop passes before the run is budget-exhausted.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Bound on a single model generation.
    #[serde(default = "default_generation_timeout", with = "duration_secs")]
    pub generation_timeout: Duration,

    /// Cap on tool-result characters shown in history; `None` keeps results verbatim.
    #[serde(default)]
    pub history_result_limit: Option<usize>,

    /// Whether to log full prompt parts and raw replies.
    #[serde(default)]
    pub verbose: bool,
}

impl AgentConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from environment variables.
    ///
    /// Environment variables are prefixed with `TOOLLOOP_AGENT_`.
    /// For example: `TOOLLOOP_AGENT_MAX_ITERATIONS=8`
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(format!("{ENV_PREFIX}{key}")).ok())
    }

    /// Loads configuration through an arbitrary key lookup (keys without prefix).
    ///
    /// # Errors
    ///
    /// Returns an error if a present value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(val) = lookup("MAX_ITERATIONS") {
            config.max_iterations = parse_value("max_iterations", &val)?;
        }

        if let Some(val) = lookup("TIMEOUT_SECONDS") {
            let seconds: u64 = parse_value("timeout_seconds", &val)?;
            config.generation_timeout = Duration::from_secs(seconds);
        }

        if let Some(val) = lookup("HISTORY_LIMIT") {
            config.history_result_limit = Some(parse_value("history_limit", &val)?);
        }

        if let Some(val) = lookup("VERBOSE") {
            config.verbose = val == "1" || val.eq_ignore_ascii_case("true");
        }

        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error for a zero iteration budget, zero timeout, or zero
    /// history limit.
    pub fn validate(&self) -> Result<&Self, ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidConfiguration {
                key: "max_iterations".to_string(),
                value: "0".to_string(),
            });
        }

        if self.generation_timeout.is_zero() {
            return Err(ConfigError::InvalidConfiguration {
                key: "generation_timeout".to_string(),
                value: "0s".to_string(),
            });
        }

        if self.history_result_limit == Some(0) {
            return Err(ConfigError::InvalidConfiguration {
                key: "history_result_limit".to_string(),
                value: "0".to_string(),
            });
        }

        Ok(self)
    }

    /// Returns a builder for creating configuration.
    #[must_use]
    pub fn builder() -> AgentConfigBuilder {
        AgentConfigBuilder::default()
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
            generation_timeout: default_generation_timeout(),
            history_result_limit: None,
            verbose: false,
        }
    }
}

/// Builder for constructing [`AgentConfig`].
#[derive(Debug, Default)]
pub struct AgentConfigBuilder {
    max_iterations: Option<u32>,
    generation_timeout: Option<Duration>,
    history_result_limit: Option<usize>,
    verbose: Option<bool>,
}

impl AgentConfigBuilder {
    /// Sets the maximum number of iterations.
    #[must_use]
    pub fn max_iterations(mut self, iterations: u32) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Sets the generation timeout.
    #[must_use]
    pub fn generation_timeout(mut self, timeout: Duration) -> Self {
        self.generation_timeout = Some(timeout);
        self
    }

    /// Caps tool results rendered into history.
    #[must_use]
    pub fn history_result_limit(mut self, limit: usize) -> Self {
        self.history_result_limit = Some(limit);
        self
    }

    /// Sets whether to enable verbose logging.
    #[must_use]
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = Some(verbose);
        self
    }

    /// Builds the configuration, validating all values.
    ///
    /// # Errors
    ///
    /// Returns an error if validation fails.
    pub fn build(self) -> Result<AgentConfig, ConfigError> {
        let mut config = AgentConfig::default();

        if let Some(v) = self.max_iterations {
            config.max_iterations = v;
        }
        if let Some(v) = self.generation_timeout {
            config.generation_timeout = v;
        }
        if let Some(v) = self.history_result_limit {
            config.history_result_limit = Some(v);
        }
        if let Some(v) = self.verbose {
            config.verbose = v;
        }

        config.validate()?;
        Ok(config)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, val: &str) -> Result<T, ConfigError> {
    val.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidConfiguration {
            key: key.to_string(),
            value: val.to_string(),
        })
}

fn default_max_iterations() -> u32 {
    5
}

fn default_generation_timeout() -> Duration {
    Duration::from_secs(30)
}

// Durations travel as whole seconds
mod duration_secs {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_u64(duration.as_secs())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let secs = u64::deserialize(deserializer)?;
        Ok(Duration::from_secs(secs))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AgentConfig::default();
        assert_eq!(config.max_iterations, 5);
        assert_eq!(config.generation_timeout, Duration::from_secs(30));
        assert_eq!(config.history_result_limit, None);
        assert!(!config.verbose);
    }

    #[test]
    fn test_builder_pattern() {
        let config = AgentConfig::builder()
            .max_iterations(8)
            .generation_timeout(Duration::from_secs(45))
            .history_result_limit(200)
            .verbose(true)
            .build()
            .unwrap();

        assert_eq!(config.max_iterations, 8);
        assert_eq!(config.generation_timeout, Duration::from_secs(45));
        assert_eq!(config.history_result_limit, Some(200));
        assert!(config.verbose);
    }

    #[test]
    fn test_invalid_config() {
        assert!(AgentConfig::builder().max_iterations(0).build().is_err());
        assert!(
            AgentConfig::builder()
                .generation_timeout(Duration::ZERO)
                .build()
                .is_err()
        );
        assert!(AgentConfig::builder().history_result_limit(0).build().is_err());
    }

    #[test]
    fn test_from_lookup() {
        let config = AgentConfig::from_lookup(lookup(&[
            ("MAX_ITERATIONS", "7"),
            ("TIMEOUT_SECONDS", "45"),
            ("HISTORY_LIMIT", "200"),
            ("VERBOSE", "TRUE"),
        ]))
        .unwrap();

        assert_eq!(config.max_iterations, 7);
        assert_eq!(config.generation_timeout, Duration::from_secs(45));
        assert_eq!(config.history_result_limit, Some(200));
        assert!(config.verbose);
    }

    #[test]
    fn test_from_lookup_rejects_garbage() {
        let err = AgentConfig::from_lookup(lookup(&[("MAX_ITERATIONS", "many")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidConfiguration {
                key: "max_iterations".to_string(),
                value: "many".to_string(),
            }
        );
    }

    #[test]
    fn test_serde_defaults() {
        let config: AgentConfig =
            serde_json::from_str(r#"{"generation_timeout": 45}"#).unwrap();
        assert_eq!(config.max_iterations, 5);
        assert_eq!(config.generation_timeout, Duration::from_secs(45));
    }
}
