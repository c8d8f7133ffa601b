use super::error_code::{self, ErrorCode};
use super::{
    ConfigError, EmbeddingError, GenerationError, RetrievalError, RoadmapError, StorageError,
    ValidationError,
};

/// Top-level error. Aggregates subsystem errors via `From` conversions so
/// request-scoped services can use `?` across crate boundaries.
#[derive(Debug, thiserror::Error)]
pub enum SyllabusError {
    #[error("retrieval error: {0}")]
    Retrieval(#[from] RetrievalError),

    #[error("roadmap error: {0}")]
    Roadmap(#[from] RoadmapError),

    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("generation error: {0}")]
    Generation(#[from] GenerationError),

    #[error("embedding error: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A request field is outside its accepted range.
    #[error("invalid request: {field}: {message}")]
    InvalidRequest { field: String, message: String },
}

impl ErrorCode for SyllabusError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Retrieval(e) => e.error_code(),
            Self::Roadmap(e) => e.error_code(),
            Self::Validation(e) => e.error_code(),
            Self::Generation(e) => e.error_code(),
            Self::Embedding(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::Serialization(_) => error_code::SERIALIZATION_ERROR,
            Self::InvalidRequest { .. } => error_code::INVALID_REQUEST,
        }
    }
}

pub type SyllabusResult<T> = Result<T, SyllabusError>;
