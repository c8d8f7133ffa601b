// Single source of truth for all default values.

use std::collections::BTreeMap;

// --- Retrieval ---
pub const DEFAULT_RETRIEVAL_LIMIT: usize = 5;
pub const DEFAULT_CURRICULUM_RETRIEVAL_LIMIT: usize = 10;

// --- Roadmap ---
pub const DEFAULT_SUMMARY_CHAR_BUDGET: usize = 160;
pub const DEFAULT_MAX_RESOURCES_PER_TOPIC: usize = 5;
pub const DEFAULT_ROOT_TITLE: &str = "학습 로드맵";
pub const DEFAULT_SUBJECT_TITLE: &str = "교과";
pub const DEFAULT_TOPIC_LABEL: &str = "기초 개념 다지기";
pub const DEFAULT_RESOURCE_LABEL: &str = "자료";

// --- Validation ---
pub const DEFAULT_MIN_PASSAGE_CHARS: usize = 80;
pub const DEFAULT_MIN_EXPLANATION_CHARS: usize = 5;

// --- Embedding ---
pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/paraphrase-multilingual-MiniLM-L12-v2";
pub const DEFAULT_EMBEDDING_DIMENSIONS: usize = 384;

// --- Storage ---
pub const DEFAULT_DATABASE_URL: &str = "postgresql://localhost:5432/syllabus";
pub const DEFAULT_EMBEDDING_TABLE: &str = "curriculum_embeddings";

// --- Generation ---
pub const DEFAULT_GENERATION_MODEL: &str = "gpt-4o-mini";

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;

/// Grade relaxation table used when no override is configured.
/// Each grade maps to its broader neighbours, most specific first.
pub fn default_grade_fallbacks() -> BTreeMap<String, Vec<String>> {
    let table: [(&str, &[&str]); 4] = [
        ("고등학교 3학년", &["고등학교 2학년", "고등학교 1학년"]),
        ("고등학교 2학년", &["고등학교 1학년"]),
        ("중학교 3학년", &["중학교 2학년", "중학교 1학년"]),
        ("초등학교 6학년", &["초등학교 5학년", "초등학교 4학년"]),
    ];
    table
        .iter()
        .map(|(grade, fallbacks)| {
            (
                (*grade).to_string(),
                fallbacks.iter().map(|f| (*f).to_string()).collect(),
            )
        })
        .collect()
}
