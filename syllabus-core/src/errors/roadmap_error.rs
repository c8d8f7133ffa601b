use super::error_code::{self, ErrorCode};

/// Roadmap graph errors.
///
/// `NodeNotFound` and `CycleDetected` are integrity violations: valid builder
/// usage never produces them.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RoadmapError {
    #[error("roadmap node not found: {id}")]
    NodeNotFound { id: String },

    #[error("linking {child} under {parent} would create a cycle")]
    CycleDetected { parent: String, child: String },

    #[error("roadmap node already exists: {id}")]
    DuplicateNode { id: String },

    #[error("cannot build a roadmap without passages")]
    NoPassages,

    #[error("roadmap integrity violation: {details}")]
    IntegrityViolation { details: String },

    #[error("roadmap persistence failed at {path}: {reason}")]
    PersistenceFailed { path: String, reason: String },
}

impl ErrorCode for RoadmapError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NodeNotFound { .. } => error_code::NODE_NOT_FOUND,
            Self::CycleDetected { .. } => error_code::CYCLE_DETECTED,
            _ => error_code::ROADMAP_ERROR,
        }
    }
}

pub type RoadmapResult<T> = Result<T, RoadmapError>;
