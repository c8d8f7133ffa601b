use super::error_code::{self, ErrorCode};

/// Retrieval subsystem errors.
///
/// Transport failures (`EmbeddingUnavailable`, `StorageUnavailable`) abort the
/// cascade as soon as they occur; `NoMatchingContent` is raised only after every
/// relaxation level came back empty.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RetrievalError {
    #[error("embedding unavailable: {reason}")]
    EmbeddingUnavailable { reason: String },

    #[error("vector storage unavailable: {reason}")]
    StorageUnavailable { reason: String },

    #[error("no matching content after {attempts} relaxation levels")]
    NoMatchingContent { attempts: usize },
}

impl ErrorCode for RetrievalError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::EmbeddingUnavailable { .. } => error_code::EMBEDDING_UNAVAILABLE,
            Self::StorageUnavailable { .. } => error_code::STORAGE_UNAVAILABLE,
            Self::NoMatchingContent { .. } => error_code::NO_MATCHING_CONTENT,
        }
    }
}

pub type RetrievalResult<T> = Result<T, RetrievalError>;
