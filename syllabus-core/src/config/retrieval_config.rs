use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::defaults;

/// Retrieval subsystem configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    /// Rows requested from the vector store per relaxation level.
    pub default_limit: usize,
    /// Rows requested when assembling a curriculum roadmap.
    pub curriculum_limit: usize,
    /// Grade relaxation table: grade → broader grades, most specific first.
    pub grade_fallbacks: BTreeMap<String, Vec<String>>,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            default_limit: defaults::DEFAULT_RETRIEVAL_LIMIT,
            curriculum_limit: defaults::DEFAULT_CURRICULUM_RETRIEVAL_LIMIT,
            grade_fallbacks: defaults::default_grade_fallbacks(),
        }
    }
}
