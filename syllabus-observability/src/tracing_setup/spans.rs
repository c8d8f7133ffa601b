//! Span definitions per operation: cascade, roadmap, validation, generation.

/// Create a retrieval cascade span.
#[macro_export]
macro_rules! cascade_span {
    ($query:expr, $filter:expr) => {
        tracing::info_span!("syllabus.cascade", query = %$query, filter = %$filter)
    };
}

/// Create a roadmap construction span.
#[macro_export]
macro_rules! roadmap_span {
    ($grade:expr, $subject:expr) => {
        tracing::info_span!("syllabus.roadmap", grade = %$grade, subject = %$subject)
    };
}

/// Create a content validation span.
#[macro_export]
macro_rules! validation_span {
    ($questions:expr, $choices:expr) => {
        tracing::info_span!("syllabus.validation", questions = $questions, choices = $choices)
    };
}

/// Create a generation span.
#[macro_export]
macro_rules! generation_span {
    ($kind:expr) => {
        tracing::info_span!("syllabus.generation", kind = %$kind)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const CASCADE: &str = "syllabus.cascade";
    pub const ROADMAP: &str = "syllabus.roadmap";
    pub const VALIDATION: &str = "syllabus.validation";
    pub const GENERATION: &str = "syllabus.generation";
}
