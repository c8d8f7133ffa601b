use super::error_code::{self, ErrorCode};

/// Text-generation collaborator errors.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GenerationError {
    /// The response could not be parsed into the expected shape.
    #[error("malformed generation output: {reason}")]
    MalformedGenerationOutput { reason: String },

    #[error("generation unavailable: {reason}")]
    GenerationUnavailable { reason: String },
}

impl ErrorCode for GenerationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MalformedGenerationOutput { .. } => error_code::MALFORMED_GENERATION_OUTPUT,
            Self::GenerationUnavailable { .. } => error_code::GENERATION_UNAVAILABLE,
        }
    }
}
