use std::fmt;

use serde::{Deserialize, Serialize};

/// A free-text query plus coarse metadata filters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalFilter {
    pub query: String,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, alias = "sub_subject")]
    pub sub_topic: Option<String>,
}

impl RetrievalFilter {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            grade: None,
            subject: None,
            sub_topic: None,
        }
    }

    pub fn with_grade(mut self, grade: impl Into<String>) -> Self {
        self.grade = Some(grade.into());
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn with_sub_topic(mut self, sub_topic: impl Into<String>) -> Self {
        self.sub_topic = Some(sub_topic.into());
        self
    }

    /// The metadata part of the filter, with blank values normalised to `None`.
    pub fn tuple(&self) -> FilterTuple {
        FilterTuple::new(
            self.grade.as_deref(),
            self.subject.as_deref(),
            self.sub_topic.as_deref(),
        )
    }
}

/// The `(grade, subject, sub_topic)` triple passed to the vector store.
///
/// Equality and hashing are by value; the retrieval cascade uses this identity
/// to guarantee no triple is queried twice.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FilterTuple {
    pub grade: Option<String>,
    pub subject: Option<String>,
    pub sub_topic: Option<String>,
}

impl FilterTuple {
    pub fn new(grade: Option<&str>, subject: Option<&str>, sub_topic: Option<&str>) -> Self {
        Self {
            grade: normalize(grade),
            subject: normalize(subject),
            sub_topic: normalize(sub_topic),
        }
    }

    /// The tuple with no filters at all.
    pub fn unfiltered() -> Self {
        Self::default()
    }

    pub fn is_unfiltered(&self) -> bool {
        self.grade.is_none() && self.subject.is_none() && self.sub_topic.is_none()
    }

    pub fn with_grade(&self, grade: Option<&str>) -> Self {
        Self {
            grade: normalize(grade),
            ..self.clone()
        }
    }

    pub fn without_subject(&self) -> Self {
        Self {
            subject: None,
            ..self.clone()
        }
    }

    pub fn without_sub_topic(&self) -> Self {
        Self {
            sub_topic: None,
            ..self.clone()
        }
    }
}

impl fmt::Display for FilterTuple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "*".to_string());
        write!(
            f,
            "grade={} subject={} sub_topic={}",
            show(&self.grade),
            show(&self.subject),
            show(&self.sub_topic)
        )
    }
}

fn normalize(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_filters_normalise_to_none() {
        let filter = RetrievalFilter::new("함수")
            .with_grade("  ")
            .with_subject("수학")
            .with_sub_topic("");
        let tuple = filter.tuple();
        assert_eq!(tuple.grade, None);
        assert_eq!(tuple.subject.as_deref(), Some("수학"));
        assert_eq!(tuple.sub_topic, None);
    }

    #[test]
    fn tuples_compare_by_value() {
        let a = FilterTuple::new(Some("고등학교 2학년"), Some("수학"), None);
        let b = FilterTuple::new(Some(" 고등학교 2학년 "), Some("수학"), Some(""));
        assert_eq!(a, b);
        assert!(FilterTuple::unfiltered().is_unfiltered());
    }
}
