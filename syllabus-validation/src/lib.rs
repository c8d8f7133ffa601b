//! # syllabus-validation
//!
//! Generated question sets cross two gates before anyone sees them:
//! parsing turns raw generator JSON into a typed [`QuestionSet`] (or fails
//! with `MalformedGenerationOutput`), then [`ContentValidator`] checks it
//! against the request.

pub mod parse;
pub mod question_set;
pub mod validator;

pub use parse::{parse_question_set, question_set_from_value};
pub use question_set::{AnswerOption, Question, QuestionSet, QuestionSetMetadata};
pub use validator::ContentValidator;
