//! # syllabus-core
//!
//! Foundation crate for the Syllabus pipeline.
//! Defines passages and retrieval filters, collaborator traits, the error taxonomy,
//! configuration, and the text helpers shared by roadmap construction and prompting.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod text;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::SyllabusConfig;
pub use errors::{ErrorCode, SyllabusError, SyllabusResult};
pub use models::{FilterTuple, Passage, RetrievalFilter};
