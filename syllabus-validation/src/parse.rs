//! Raw generator output → typed [`QuestionSet`].

use serde_json::Value;

use syllabus_core::errors::GenerationError;

use crate::question_set::QuestionSet;

/// Parse generator output text.
pub fn parse_question_set(raw: &str) -> Result<QuestionSet, GenerationError> {
    let value: Value =
        serde_json::from_str(raw.trim()).map_err(|e| GenerationError::MalformedGenerationOutput {
            reason: format!("not valid JSON: {e}"),
        })?;
    question_set_from_value(value)
}

/// Convert an already-decoded JSON document.
pub fn question_set_from_value(value: Value) -> Result<QuestionSet, GenerationError> {
    if !value.is_object() {
        return Err(GenerationError::MalformedGenerationOutput {
            reason: "expected a JSON object at the top level".to_string(),
        });
    }
    serde_json::from_value(value).map_err(|e| GenerationError::MalformedGenerationOutput {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_json_is_malformed() {
        let err = parse_question_set("{passage: oops").unwrap_err();
        assert!(matches!(err, GenerationError::MalformedGenerationOutput { .. }));
    }

    #[test]
    fn top_level_array_is_malformed() {
        let err = question_set_from_value(serde_json::json!([1, 2])).unwrap_err();
        assert!(matches!(err, GenerationError::MalformedGenerationOutput { .. }));
    }

    #[test]
    fn missing_field_is_malformed() {
        let err = question_set_from_value(serde_json::json!({
            "passage": "본문",
            "questions": [{"question": "q", "options": [], "answer": "1"}],
            "metadata": {}
        }))
        .unwrap_err();
        let GenerationError::MalformedGenerationOutput { reason } = err else {
            panic!("wrong variant");
        };
        assert!(reason.contains("explanation"));
    }
}
