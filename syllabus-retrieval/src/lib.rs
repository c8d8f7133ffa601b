//! # syllabus-retrieval
//!
//! Drives a single retrieval primitive through a deterministic sequence of
//! filter relaxations until a level returns rows.
//!
//! Order: primary filter → broader grades (from the relaxation table) →
//! no grade → no subject → no sub-topic. Results are never blended across levels.

pub mod cascade;
pub mod query;
pub mod relaxation;
pub mod vector;

pub use cascade::{
    retrieve_with_fallback, CascadeAttempt, CascadeOutcome, RelaxationLevel, RelaxationStep,
    RetrievalCascade,
};
pub use query::build_query;
pub use relaxation::FilterRelaxationTable;
pub use vector::VectorRetriever;
