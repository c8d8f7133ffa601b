//! Top-level Syllabus configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{
    EmbeddingConfig, GenerationConfig, ObservabilityConfig, RetrievalConfig, RoadmapConfig,
    StorageConfig, ValidationConfig,
};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`SYLLABUS_*`)
/// 2. Config file (`syllabus.toml`)
/// 3. Compiled defaults
///
/// Values are handed to constructors explicitly; nothing reads this globally.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SyllabusConfig {
    pub retrieval: RetrievalConfig,
    pub roadmap: RoadmapConfig,
    pub validation: ValidationConfig,
    pub embedding: EmbeddingConfig,
    pub storage: StorageConfig,
    pub generation: GenerationConfig,
    pub observability: ObservabilityConfig,
}

impl SyllabusConfig {
    /// Load configuration: defaults, then the optional TOML file, then the
    /// process environment. The result is validated before it is returned.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_env_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file without environment overrides.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Apply `SYLLABUS_*` overrides read through `lookup`.
    /// Unparseable numeric values are ignored.
    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("SYLLABUS_DATABASE_URL") {
            self.storage.database_url = val;
        }
        if let Some(val) = lookup("SYLLABUS_EMBEDDING_MODEL") {
            self.embedding.model = val;
        }
        if let Some(val) = lookup("SYLLABUS_GENERATION_MODEL") {
            self.generation.model = val;
        }
        if let Some(val) = lookup("SYLLABUS_RETRIEVAL_LIMIT") {
            if let Ok(v) = val.parse::<usize>() {
                self.retrieval.default_limit = v;
            }
        }
        if let Some(val) = lookup("SYLLABUS_LOG_LEVEL") {
            self.observability.log_level = val;
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.retrieval.default_limit == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "retrieval.default_limit".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.retrieval.curriculum_limit == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "retrieval.curriculum_limit".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        for (grade, fallbacks) in &self.retrieval.grade_fallbacks {
            if fallbacks.iter().any(|f| f == grade) {
                return Err(ConfigError::ValidationFailed {
                    field: format!("retrieval.grade_fallbacks.{grade}"),
                    message: "a grade cannot fall back to itself".to_string(),
                });
            }
        }
        // Room for at least one character plus the ellipsis marker.
        if self.roadmap.summary_char_budget <= crate::constants::ELLIPSIS.chars().count() {
            return Err(ConfigError::ValidationFailed {
                field: "roadmap.summary_char_budget".to_string(),
                message: "must leave room for the ellipsis marker".to_string(),
            });
        }
        if self.embedding.dimensions == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "embedding.dimensions".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}
