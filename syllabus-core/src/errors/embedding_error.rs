use super::error_code::{self, ErrorCode};

/// Errors reported by an embedding provider.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EmbeddingError {
    #[error("embedding request failed for model {model}: {reason}")]
    RequestFailed { model: String, reason: String },

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("provider returned an empty or non-finite vector")]
    InvalidVector,
}

impl ErrorCode for EmbeddingError {
    fn error_code(&self) -> &'static str {
        error_code::EMBEDDING_UNAVAILABLE
    }
}
