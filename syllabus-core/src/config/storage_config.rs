use serde::{Deserialize, Serialize};

use super::defaults;

/// Vector store configuration.
///
/// Consumed by `IVectorStore` implementations; this workspace only loads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub database_url: String,
    /// Table holding passage embeddings.
    pub table: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: defaults::DEFAULT_DATABASE_URL.to_string(),
            table: defaults::DEFAULT_EMBEDDING_TABLE.to_string(),
        }
    }
}
