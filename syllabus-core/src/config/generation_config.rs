use serde::{Deserialize, Serialize};

use super::defaults;

/// Text-generation collaborator configuration.
///
/// Consumed by `IGenerator` implementations; this workspace only loads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    pub model: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: defaults::DEFAULT_GENERATION_MODEL.to_string(),
        }
    }
}
