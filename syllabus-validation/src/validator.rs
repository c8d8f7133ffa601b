//! Structural checks on a parsed question set.
//!
//! Checks run in a fixed order and stop at the first violation:
//! passage length, non-empty question list, then per question the option
//! count, each option's label and text, the answer label, and the explanation.

use std::collections::HashSet;

use tracing::warn;

use syllabus_core::config::ValidationConfig;
use syllabus_core::errors::ValidationError;
use syllabus_core::text::trimmed_len;

use crate::question_set::{Question, QuestionSet};

#[derive(Debug, Clone, Default)]
pub struct ContentValidator {
    config: ValidationConfig,
}

impl ContentValidator {
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate with the configured minimum passage length.
    pub fn validate_default(
        &self,
        set: &QuestionSet,
        requested_choices: usize,
    ) -> Result<(), ValidationError> {
        self.validate(set, requested_choices, self.config.min_passage_chars)
    }

    /// Fail fast on the first structural mismatch. A set that passes is
    /// left untouched.
    pub fn validate(
        &self,
        set: &QuestionSet,
        requested_choices: usize,
        min_passage_length: usize,
    ) -> Result<(), ValidationError> {
        let result = self.check(set, requested_choices, min_passage_length);
        if let Err(err) = &result {
            warn!(
                question = err.question_index(),
                requested_choices,
                error = %err,
                "generated content rejected"
            );
        }
        result
    }

    fn check(
        &self,
        set: &QuestionSet,
        requested_choices: usize,
        min_passage_length: usize,
    ) -> Result<(), ValidationError> {
        let length = trimmed_len(&set.passage);
        if length < min_passage_length {
            return Err(ValidationError::PassageTooShort {
                length,
                minimum: min_passage_length,
            });
        }
        if set.questions.is_empty() {
            return Err(ValidationError::EmptyQuestionSet);
        }

        let allowed: HashSet<String> = (1..=requested_choices).map(|n| n.to_string()).collect();
        for (offset, question) in set.questions.iter().enumerate() {
            self.check_question(offset + 1, question, requested_choices, &allowed)?;
        }
        Ok(())
    }

    fn check_question(
        &self,
        index: usize,
        question: &Question,
        requested_choices: usize,
        allowed: &HashSet<String>,
    ) -> Result<(), ValidationError> {
        if question.options.len() != requested_choices {
            return Err(ValidationError::OptionCountMismatch {
                question: index,
                expected: requested_choices,
                actual: question.options.len(),
            });
        }

        let mut seen: HashSet<&str> = HashSet::with_capacity(question.options.len());
        for option in &question.options {
            if !allowed.contains(&option.label) {
                return Err(ValidationError::UnexpectedLabel {
                    question: index,
                    label: option.label.clone(),
                });
            }
            if !seen.insert(option.label.as_str()) {
                return Err(ValidationError::DuplicateLabel {
                    question: index,
                    label: option.label.clone(),
                });
            }
            if option.text.trim().is_empty() {
                return Err(ValidationError::EmptyOptionText {
                    question: index,
                    label: option.label.clone(),
                });
            }
        }

        if !seen.contains(question.answer.as_str()) {
            return Err(ValidationError::AnswerNotInOptions {
                question: index,
                answer: question.answer.clone(),
            });
        }
        if trimmed_len(&question.explanation) < self.config.min_explanation_chars {
            return Err(ValidationError::ExplanationTooShort {
                question: index,
                minimum: self.config.min_explanation_chars,
            });
        }
        Ok(())
    }
}
