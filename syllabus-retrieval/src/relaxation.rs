//! Grade relaxation lookup.
//!
//! Lookups are single-level: a fallback grade's own fallbacks are never
//! chained, so the number of candidates is bounded by the entry length.

use std::collections::BTreeMap;

use syllabus_core::config::{defaults, RetrievalConfig};

/// Explicit `grade → broader grades` table, most specific fallback first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRelaxationTable {
    fallbacks: BTreeMap<String, Vec<String>>,
}

impl Default for FilterRelaxationTable {
    fn default() -> Self {
        Self::new(defaults::default_grade_fallbacks())
    }
}

impl FilterRelaxationTable {
    /// Build a table. Blank entries, repeats, and self references are dropped.
    pub fn new(fallbacks: BTreeMap<String, Vec<String>>) -> Self {
        let fallbacks = fallbacks
            .into_iter()
            .filter_map(|(grade, list)| {
                let grade = grade.trim().to_string();
                if grade.is_empty() {
                    return None;
                }
                let mut cleaned: Vec<String> = Vec::with_capacity(list.len());
                for fallback in list {
                    let fallback = fallback.trim().to_string();
                    if fallback.is_empty() || fallback == grade || cleaned.contains(&fallback) {
                        continue;
                    }
                    cleaned.push(fallback);
                }
                Some((grade, cleaned))
            })
            .collect();
        Self { fallbacks }
    }

    /// A table without any grade fallbacks.
    pub fn empty() -> Self {
        Self {
            fallbacks: BTreeMap::new(),
        }
    }

    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self::new(config.grade_fallbacks.clone())
    }

    /// Broader grades for `grade`, most specific first. Empty when unknown.
    pub fn fallbacks(&self, grade: &str) -> &[String] {
        self.fallbacks
            .get(grade.trim())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Grades to try in order: the grade itself, its fallbacks, then no grade.
    /// A missing grade yields only `[None]`.
    pub fn candidate_grades(&self, grade: Option<&str>) -> Vec<Option<String>> {
        let grade = grade.map(str::trim).filter(|g| !g.is_empty());
        let Some(grade) = grade else {
            return vec![None];
        };
        let mut candidates = vec![Some(grade.to_string())];
        candidates.extend(self.fallbacks(grade).iter().cloned().map(Some));
        candidates.push(None);
        candidates
    }

    /// Number of grade candidates for `grade`; the cascade makes at most
    /// `relaxation_depth + 2` primitive calls.
    pub fn relaxation_depth(&self, grade: Option<&str>) -> usize {
        self.candidate_grades(grade).len()
    }

    /// Grades with at least one configured fallback.
    pub fn grades(&self) -> impl Iterator<Item = &str> {
        self.fallbacks.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fallbacks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fallbacks.is_empty()
    }
}
