//! Curriculum roadmap generation from retrieved passages.

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use syllabus_core::config::SyllabusConfig;
use syllabus_core::errors::{RetrievalError, SyllabusError, SyllabusResult};
use syllabus_core::models::{Passage, RetrievalFilter};
use syllabus_core::traits::IPassageRetriever;
use syllabus_observability::{events, roadmap_span, QueryLog};
use syllabus_retrieval::{CascadeOutcome, RetrievalCascade};
use syllabus_roadmap::{Roadmap, RoadmapBuilder};

use crate::feedback::AssessmentResult;
use crate::retrieval::run_cascade;

/// Weak area used when every answer was correct.
const GENERAL_REVIEW: &str = "전반적인 복습";
/// Weak area for an incorrect answer without a topic.
const UNTOPICED_AREA: &str = "기초 개념";
const MAX_SUPPLEMENTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurriculumRequest {
    pub subject: String,
    #[serde(default)]
    pub grade: Option<String>,
}

impl CurriculumRequest {
    pub fn new(subject: impl Into<String>, grade: Option<&str>) -> Self {
        Self {
            subject: subject.into(),
            grade: grade.map(str::to_string),
        }
    }

    /// Retrieval query `"{subject} {grade}"`, filtered on both.
    fn filter(&self) -> RetrievalFilter {
        let grade = self.grade.as_deref().unwrap_or("").trim();
        RetrievalFilter {
            query: format!("{} {}", self.subject.trim(), grade).trim().to_string(),
            grade: self.grade.clone(),
            subject: Some(self.subject.clone()),
            sub_topic: None,
        }
    }
}

/// Assessment results to fold back into an existing roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurriculumUpdateRequest {
    pub subject: String,
    #[serde(default)]
    pub grade: Option<String>,
    #[serde(default)]
    pub results: Vec<AssessmentResult>,
}

impl CurriculumUpdateRequest {
    pub fn new(
        subject: impl Into<String>,
        grade: Option<&str>,
        results: Vec<AssessmentResult>,
    ) -> Self {
        Self {
            subject: subject.into(),
            grade: grade.map(str::to_string),
            results,
        }
    }

    /// Topics of incorrect answers in first-appearance order, or
    /// `["전반적인 복습"]` when nothing was missed.
    pub fn weak_areas(&self) -> Vec<String> {
        let mut areas: Vec<String> = Vec::new();
        for result in self.results.iter().filter(|r| !r.correct) {
            let area = result
                .topic
                .as_deref()
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .unwrap_or(UNTOPICED_AREA);
            if !areas.iter().any(|a| a == area) {
                areas.push(area.to_string());
            }
        }
        if areas.is_empty() {
            areas.push(GENERAL_REVIEW.to_string());
        }
        areas
    }

    fn area_filter(&self, area: &str) -> RetrievalFilter {
        let grade = self.grade.as_deref().unwrap_or("").trim();
        let query = [grade, self.subject.trim(), area]
            .iter()
            .filter(|part| !part.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        RetrievalFilter {
            query,
            grade: self.grade.clone(),
            subject: Some(self.subject.clone()),
            sub_topic: None,
        }
    }
}

/// The updated roadmap. The input roadmap is left untouched.
#[derive(Debug, Clone)]
pub struct CurriculumUpdate {
    pub roadmap: Roadmap,
    pub weak_areas: Vec<String>,
    /// Ids of the supplement nodes, in weak-area order.
    pub added: Vec<String>,
    /// Passages retrieved for the weak areas, capped at the curriculum limit.
    pub passages: Vec<Passage>,
}

impl CurriculumUpdate {
    pub fn total_nodes(&self) -> usize {
        self.roadmap.len()
    }
}

/// A built roadmap plus the retrieval behind it.
#[derive(Debug, Clone)]
pub struct CurriculumRoadmap {
    pub roadmap: Roadmap,
    pub retrieval: CascadeOutcome,
}

pub struct CurriculumService<'a> {
    retriever: &'a dyn IPassageRetriever,
    cascade: RetrievalCascade,
    limit: usize,
    builder: RoadmapBuilder,
    query_log: Option<&'a Mutex<QueryLog>>,
}

impl<'a> CurriculumService<'a> {
    pub fn new(retriever: &'a dyn IPassageRetriever, config: &SyllabusConfig) -> Self {
        Self {
            retriever,
            cascade: RetrievalCascade::from_config(&config.retrieval)
                .with_limit(config.retrieval.curriculum_limit),
            limit: config.retrieval.curriculum_limit,
            builder: RoadmapBuilder::new(config.roadmap.clone()),
            query_log: None,
        }
    }

    pub fn with_query_log(mut self, log: &'a Mutex<QueryLog>) -> Self {
        self.query_log = Some(log);
        self
    }

    /// Retrieve passages for the subject and grade and assemble a roadmap.
    /// `NoMatchingContent` propagates; no empty roadmap is produced.
    pub fn generate_roadmap(&self, request: &CurriculumRequest) -> SyllabusResult<CurriculumRoadmap> {
        if request.subject.trim().is_empty() {
            return Err(SyllabusError::InvalidRequest {
                field: "subject".to_string(),
                message: "must not be blank".to_string(),
            });
        }
        let grade = request.grade.as_deref().unwrap_or("");
        let span = roadmap_span!(grade, request.subject);
        let _guard = span.enter();

        let retrieval = run_cascade(
            &self.cascade,
            &request.filter(),
            self.retriever,
            self.query_log,
        )?;
        let roadmap = self.builder.build(grade, &request.subject, &retrieval.passages)?;

        let topics = roadmap
            .root()
            .and_then(|root| root.child_ids.first().cloned())
            .map(|subject_id| roadmap.get_children(&subject_id).map(|c| c.len()))
            .transpose()?
            .unwrap_or(0);
        events::roadmap_built(roadmap.root_id().unwrap_or_default(), roadmap.len(), topics);

        Ok(CurriculumRoadmap { roadmap, retrieval })
    }

    /// Append remedial topics for the weak areas found in `request.results`.
    ///
    /// Each weak area gets its own retrieval with an even share of the
    /// curriculum limit; the combined passages are capped at that limit.
    /// When nothing comes back the roadmap is returned unchanged. Otherwise
    /// up to three `"{area} 보충 학습"` nodes are linked under the subject
    /// node (or the root when there is none).
    pub fn update_roadmap(
        &self,
        roadmap: &Roadmap,
        request: &CurriculumUpdateRequest,
    ) -> SyllabusResult<CurriculumUpdate> {
        let Some(root) = roadmap.root() else {
            return Err(SyllabusError::InvalidRequest {
                field: "roadmap".to_string(),
                message: "has no root".to_string(),
            });
        };
        let grade = request.grade.as_deref().unwrap_or("");
        let span = roadmap_span!(grade, request.subject);
        let _guard = span.enter();

        let weak_areas = request.weak_areas();
        let per_area = (self.limit / weak_areas.len()).max(1);
        let cascade = self.cascade.with_limit(per_area);

        let mut remaining = self.limit;
        let mut by_area: Vec<(&str, Vec<Passage>)> = Vec::with_capacity(weak_areas.len());
        for area in &weak_areas {
            let filter = request.area_filter(area);
            let mut rows = match run_cascade(&cascade, &filter, self.retriever, self.query_log) {
                Ok(outcome) => outcome.passages,
                Err(SyllabusError::Retrieval(RetrievalError::NoMatchingContent { .. })) => {
                    Vec::new()
                }
                Err(err) => return Err(err),
            };
            rows.truncate(remaining);
            remaining -= rows.len();
            by_area.push((area.as_str(), rows));
        }

        let mut updated = roadmap.clone();
        let mut added = Vec::new();
        if by_area.iter().any(|(_, rows)| !rows.is_empty()) {
            let parent_id = root.child_ids.first().unwrap_or(&root.id);
            for (area, rows) in by_area.iter().take(MAX_SUPPLEMENTS) {
                added.push(self.builder.add_supplement(&mut updated, parent_id, area, rows)?);
            }
        }

        let passages: Vec<Passage> = by_area.into_iter().flat_map(|(_, rows)| rows).collect();
        events::roadmap_updated(&root.id, weak_areas.len(), added.len(), updated.len());
        Ok(CurriculumUpdate {
            roadmap: updated,
            weak_areas,
            added,
            passages,
        })
    }
}
