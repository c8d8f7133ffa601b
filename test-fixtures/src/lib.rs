//! Test fixture loader for Syllabus golden datasets, plus scripted doubles for
//! the external collaborators (retrieval primitive, embedder, vector store,
//! generator).

pub mod doubles;

use serde::de::DeserializeOwned;
use std::path::PathBuf;

use syllabus_core::models::Passage;

pub use doubles::{
    FailingEmbedder, FixedEmbedder, MemoryVectorStore, ScriptedGenerator, ScriptedRetriever,
};

/// Root directory of the test-fixtures folder.
fn fixtures_root() -> PathBuf {
    // Works from any crate in the workspace: walk up to find test-fixtures.
    let manifest_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let mut path = PathBuf::from(&manifest_dir);

    while !path.join("test-fixtures").exists() {
        if !path.pop() {
            panic!(
                "Could not find test-fixtures directory from CARGO_MANIFEST_DIR={}",
                manifest_dir
            );
        }
    }
    path.join("test-fixtures")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// Load a fixture file as raw JSON Value.
pub fn load_fixture_value(relative_path: &str) -> serde_json::Value {
    load_fixture(relative_path)
}

/// Load a `golden/passages/*.json` file as passages.
pub fn load_passages(name: &str) -> Vec<Passage> {
    load_fixture(&format!("golden/passages/{name}.json"))
}

pub fn fixture_exists(relative_path: &str) -> bool {
    fixtures_root().join(relative_path).exists()
}

pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// List all JSON files in a fixture subdirectory.
pub fn list_fixtures(subdir: &str) -> Vec<PathBuf> {
    let dir = fixtures_root().join(subdir);
    if !dir.exists() {
        return Vec::new();
    }
    let mut files: Vec<PathBuf> = std::fs::read_dir(&dir)
        .unwrap_or_else(|e| panic!("Failed to read directory {}: {}", dir.display(), e))
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                Some(path)
            } else {
                None
            }
        })
        .collect();
    files.sort();
    files
}

/// Build a passage with the common fields set.
pub fn passage(
    source_name: &str,
    grade: Option<&str>,
    subject: Option<&str>,
    sub_topic: Option<&str>,
    text: &str,
) -> Passage {
    Passage {
        source_name: source_name.to_string(),
        grade: grade.map(str::to_string),
        subject: subject.map(str::to_string),
        sub_topic: sub_topic.map(str::to_string),
        text: text.to_string(),
        achievement_codes: Vec::new(),
        difficulty: None,
        distance: 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixtures_root_exists() {
        assert!(fixtures_root().exists(), "test-fixtures directory not found");
    }

    #[test]
    fn all_golden_files_exist() {
        let files = [
            "golden/passages/high_school_math.json",
            "golden/passages/middle_school_science.json",
            "golden/generation/valid_question_set.json",
            "golden/generation/five_options_for_four.json",
            "golden/generation/integer_labels.json",
            "golden/roadmap/two_topic_tree.json",
        ];
        for f in &files {
            assert!(fixture_exists(f), "Missing fixture: {}", f);
        }
    }

    #[test]
    fn golden_passages_parse() {
        let passages = load_passages("high_school_math");
        assert_eq!(passages.len(), 4);
        assert!(passages.iter().all(|p| !p.text.is_empty()));
    }

    #[test]
    fn every_golden_file_parses_as_json() {
        let mut total = 0;
        for dir in ["golden/passages", "golden/generation", "golden/roadmap"] {
            for file in list_fixtures(dir) {
                let content = std::fs::read_to_string(&file)
                    .unwrap_or_else(|e| panic!("Failed to read {}: {}", file.display(), e));
                let _: serde_json::Value = serde_json::from_str(&content)
                    .unwrap_or_else(|e| panic!("Failed to parse {}: {}", file.display(), e));
                total += 1;
            }
        }
        assert_eq!(total, 6, "Expected 6 golden files, found {}", total);
    }
}
