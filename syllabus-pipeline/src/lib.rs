//! # syllabus-pipeline
//!
//! Request-scoped services that wire retrieval, roadmap construction,
//! generation and validation together. Every collaborator is passed in by
//! the caller; nothing here is global.

pub mod assessment;
pub mod curriculum;
pub mod feedback;
pub mod prompt;
mod retrieval;

pub use assessment::{AssessmentRequest, AssessmentService, GeneratedAssessment};
pub use curriculum::{
    CurriculumRequest, CurriculumRoadmap, CurriculumService, CurriculumUpdate,
    CurriculumUpdateRequest,
};
pub use feedback::{
    AssessmentResult, CurriculumContext, Feedback, FeedbackOutcome, FeedbackService,
    FeedbackSource, FeedbackStats, TopicStats,
};
