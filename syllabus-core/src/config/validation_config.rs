use serde::{Deserialize, Serialize};

use super::defaults;

/// Generated-content validation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Minimum trimmed passage length, in characters.
    pub min_passage_chars: usize,
    /// Minimum trimmed explanation length per question, in characters.
    pub min_explanation_chars: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            min_passage_chars: defaults::DEFAULT_MIN_PASSAGE_CHARS,
            min_explanation_chars: defaults::DEFAULT_MIN_EXPLANATION_CHARS,
        }
    }
}
