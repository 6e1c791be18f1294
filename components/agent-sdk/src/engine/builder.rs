//! Engine builder pattern.

use crate::agent::AgentProfile;
use crate::config::AgentConfig;
use crate::engine::AgentEngine;
use crate::error::{AgentError, ConfigError};
use crate::inference::Generator;
use crate::tools::{ToolCatalog, ToolHost};
use std::sync::Arc;

/// Builder for constructing agent engines.
#[derive(Default)]
pub struct AgentEngineBuilder {
    profile: Option<AgentProfile>,
    catalog: Option<ToolCatalog>,
    generator: Option<Arc<dyn Generator>>,
    host: Option<Arc<dyn ToolHost>>,
    config: Option<AgentConfig>,
}

impl AgentEngineBuilder {
    /// Creates a new builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the agent profile.
    #[must_use]
    pub fn profile(mut self, profile: AgentProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    /// Sets the tool catalog. When omitted, [`discover`](Self::discover) must fill it.
    #[must_use]
    pub fn catalog(mut self, catalog: ToolCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Sets the model.
    #[must_use]
    pub fn generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Sets the tool host.
    #[must_use]
    pub fn host(mut self, host: Arc<dyn ToolHost>) -> Self {
        self.host = Some(host);
        self
    }

    /// Sets the configuration.
    #[must_use]
    pub fn config(mut self, config: AgentConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Lists the host's tools and uses them as the catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if no host is set or the listing fails.
    pub async fn discover(mut self) -> Result<Self, AgentError> {
        let host = self.host.as_ref().ok_or_else(|| missing("host"))?;
        let specs = host.list_tools().await?;
        let catalog = ToolCatalog::from_specs(specs);
        tracing::info!(
            tools = catalog.len(),
            placeholders = catalog.placeholder_count(),
            "Discovered tools"
        );
        self.catalog = Some(catalog);
        Ok(self)
    }

    /// Builds the agent engine.
    ///
    /// # Errors
    ///
    /// Returns an error if a required part is missing or the configuration is invalid.
    pub fn build(self) -> Result<AgentEngine, AgentError> {
        let profile = self.profile.ok_or_else(|| missing("profile"))?;
        let catalog = self.catalog.ok_or_else(|| missing("catalog"))?;
        let generator = self.generator.ok_or_else(|| missing("generator"))?;
        let host = self.host.ok_or_else(|| missing("host"))?;
        let config = self.config.unwrap_or_default();
        config.validate()?;

        Ok(AgentEngine::new(profile, catalog, generator, host, config))
    }
}

fn missing(key: &str) -> AgentError {
    ConfigError::MissingConfiguration {
        key: key.to_string(),
    }
    .into()
}
