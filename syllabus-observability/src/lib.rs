//! # syllabus-observability
//!
//! Structured logging for the pipeline: subscriber setup, one span per
//! operation, named events for the decisions worth auditing (relaxations,
//! rejections, degradations), and a bounded retrieval query log.

pub mod query_log;
pub mod tracing_setup;

pub use query_log::{QueryLog, QueryLogEntry};
pub use tracing_setup::{events, init_tracing, init_tracing_with_filter};
