use serde::{Deserialize, Deserializer, Serialize};

/// One answer choice. Labels arrive as strings or integers and are stored
/// as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    #[serde(deserialize_with = "label_string")]
    pub label: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub options: Vec<AnswerOption>,
    #[serde(deserialize_with = "label_string")]
    pub answer: String,
    pub explanation: String,
}

impl Question {
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.options.iter().map(|o| o.label.as_str())
    }

    /// The option the answer label points at, if any.
    pub fn answer_option(&self) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.label == self.answer)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSetMetadata {
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, alias = "sub_subject")]
    pub sub_topic: Option<String>,
    #[serde(default)]
    pub source_ids: Vec<String>,
}

/// A reading passage with multiple-choice questions about it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionSet {
    pub passage: String,
    pub questions: Vec<Question>,
    pub metadata: QuestionSetMetadata,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawLabel {
    Text(String),
    Integer(i64),
}

fn label_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match RawLabel::deserialize(deserializer)? {
        RawLabel::Text(text) => text.trim().to_string(),
        RawLabel::Integer(n) => n.to_string(),
    })
}
