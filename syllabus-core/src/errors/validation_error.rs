use super::error_code::{self, ErrorCode};

/// Structural mismatch between a generated question set and the request.
///
/// Question indices are 1-based, matching how the set is shown to learners.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("generated passage is too short: {length} characters, need at least {minimum}")]
    PassageTooShort { length: usize, minimum: usize },

    #[error("generated question set is empty")]
    EmptyQuestionSet,

    #[error("question {question}: expected {expected} options, found {actual}")]
    OptionCountMismatch {
        question: usize,
        expected: usize,
        actual: usize,
    },

    #[error("question {question}: option label '{label}' is not allowed")]
    UnexpectedLabel { question: usize, label: String },

    #[error("question {question}: option label '{label}' is duplicated")]
    DuplicateLabel { question: usize, label: String },

    #[error("question {question}: option '{label}' has no text")]
    EmptyOptionText { question: usize, label: String },

    #[error("question {question}: answer '{answer}' is not among the option labels")]
    AnswerNotInOptions { question: usize, answer: String },

    #[error("question {question}: explanation is shorter than {minimum} characters")]
    ExplanationTooShort { question: usize, minimum: usize },
}

impl ValidationError {
    /// The offending question (1-based), when the violation is question-specific.
    pub fn question_index(&self) -> Option<usize> {
        match self {
            Self::PassageTooShort { .. } | Self::EmptyQuestionSet => None,
            Self::OptionCountMismatch { question, .. }
            | Self::UnexpectedLabel { question, .. }
            | Self::DuplicateLabel { question, .. }
            | Self::EmptyOptionText { question, .. }
            | Self::AnswerNotInOptions { question, .. }
            | Self::ExplanationTooShort { question, .. } => Some(*question),
        }
    }
}

impl ErrorCode for ValidationError {
    fn error_code(&self) -> &'static str {
        error_code::VALIDATION_ERROR
    }
}
