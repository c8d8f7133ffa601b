use super::error_code::{self, ErrorCode};

/// Errors reported by the vector store.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StorageError {
    #[error("connection failed: {reason}")]
    ConnectionFailed { reason: String },

    #[error("query failed: {reason}")]
    QueryFailed { reason: String },
}

impl ErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        error_code::STORAGE_UNAVAILABLE
    }
}
