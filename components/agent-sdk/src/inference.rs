//! The model boundary.

use crate::error::GenerationError;
use async_trait::async_trait;

/// A language model that turns ordered prompt parts into plain text.
///
/// Implementations hide every provider-specific response shape; the engine
/// only ever sees text or a [`GenerationError`]. The engine enforces the
/// generation timeout, so implementations need not.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generates a completion for the given prompt parts.
    ///
    /// # Errors
    ///
    /// Returns an error when the provider fails or yields no text.
    async fn generate(&self, parts: &[String]) -> Result<String, GenerationError>;
}

#[async_trait]
impl<G: Generator + ?Sized> Generator for std::sync::Arc<G> {
    async fn generate(&self, parts: &[String]) -> Result<String, GenerationError> {
        (**self).generate(parts).await
    }
}
