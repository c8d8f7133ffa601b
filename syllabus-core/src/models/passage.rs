use serde::{Deserialize, Serialize};

/// An immutable passage returned by the retrieval primitive.
///
/// Passages are snapshots of vector-store rows. Roadmaps never own them; they
/// only copy identifiers and metadata into resource references.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Passage {
    /// Source document name, used as the citation identifier.
    #[serde(default)]
    pub source_name: String,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    /// Sub-topic label. Stored as `sub_subject` by the ingestion tooling.
    #[serde(default, alias = "sub_subject")]
    pub sub_topic: Option<String>,
    pub text: String,
    #[serde(default)]
    pub achievement_codes: Vec<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    /// Distance to the query vector; smaller is closer.
    #[serde(default)]
    pub distance: f64,
}

impl Passage {
    /// Sub-topic label if present and not blank.
    pub fn sub_topic_label(&self) -> Option<&str> {
        non_blank(self.sub_topic.as_deref())
    }

    /// Difficulty tag if present and not blank.
    pub fn difficulty_label(&self) -> Option<&str> {
        non_blank(self.difficulty.as_deref())
    }

    /// Source name if not blank.
    pub fn source_label(&self) -> Option<&str> {
        non_blank(Some(self.source_name.as_str()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}
