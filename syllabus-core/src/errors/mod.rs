//! Error handling for Syllabus.
//! One error enum per subsystem, `thiserror` only, aggregated by `SyllabusError`.

pub mod config_error;
pub mod embedding_error;
pub mod error_code;
pub mod generation_error;
pub mod retrieval_error;
pub mod roadmap_error;
pub mod storage_error;
pub mod syllabus_error;
pub mod validation_error;

pub use config_error::ConfigError;
pub use embedding_error::EmbeddingError;
pub use error_code::ErrorCode;
pub use generation_error::GenerationError;
pub use retrieval_error::{RetrievalError, RetrievalResult};
pub use roadmap_error::{RoadmapError, RoadmapResult};
pub use storage_error::StorageError;
pub use syllabus_error::{SyllabusError, SyllabusResult};
pub use validation_error::ValidationError;
