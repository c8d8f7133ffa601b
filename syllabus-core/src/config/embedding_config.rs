use serde::{Deserialize, Serialize};

use super::defaults;

/// Embedding collaborator configuration.
///
/// Consumed by `IEmbeddingProvider` implementations; this workspace only
/// loads and validates it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EmbeddingConfig {
    /// Model identifier passed to the embedding provider.
    pub model: String,
    /// Expected vector dimensionality for this deployment.
    pub dimensions: usize,
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_EMBEDDING_MODEL.to_string(),
            dimensions: defaults::DEFAULT_EMBEDDING_DIMENSIONS,
        }
    }
}
