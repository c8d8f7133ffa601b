//! Retrieval-with-fallback cascade.
//!
//! The plan is computed up front from the filter and the relaxation table:
//!
//! 1. the primary `(grade, subject, sub_topic)` triple
//! 2. `(fallback, subject, sub_topic)` for each broader grade, then no grade
//! 3. `(None, None, sub_topic)`
//! 4. `(None, None, None)`
//!
//! Duplicate triples are removed while keeping first-occurrence order, so the
//! primitive is never called twice with the same filter. The first level that
//! yields rows wins; later levels are not tried.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use syllabus_core::config::RetrievalConfig;
use syllabus_core::errors::{RetrievalError, RetrievalResult};
use syllabus_core::models::{FilterTuple, Passage, RetrievalFilter};
use syllabus_core::traits::IPassageRetriever;

use crate::relaxation::FilterRelaxationTable;

/// Which relaxation produced a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelaxationLevel {
    /// The filter exactly as supplied.
    Primary,
    /// Grade replaced by a broader grade, or dropped.
    Grade,
    /// Grade and subject dropped.
    Subject,
    /// Every filter dropped.
    SubTopic,
    /// Safety net when no earlier step was already unfiltered.
    Unfiltered,
}

impl fmt::Display for RelaxationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Primary => "primary",
            Self::Grade => "grade",
            Self::Subject => "subject",
            Self::SubTopic => "sub_topic",
            Self::Unfiltered => "unfiltered",
        };
        f.write_str(label)
    }
}

/// One planned primitive call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelaxationStep {
    pub level: RelaxationLevel,
    pub tuple: FilterTuple,
}

/// Record of one executed step and how many rows it produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CascadeAttempt {
    pub step: RelaxationStep,
    pub rows: usize,
}

/// Result of a successful cascade run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CascadeOutcome {
    /// Rows from the first non-empty level, in primitive order.
    pub passages: Vec<Passage>,
    /// The step that produced `passages`.
    pub matched: RelaxationStep,
    /// Every step executed, in order. The last one is `matched`.
    pub attempts: Vec<CascadeAttempt>,
}

impl CascadeOutcome {
    /// Whether any relaxation was needed.
    pub fn relaxed(&self) -> bool {
        self.matched.level != RelaxationLevel::Primary
    }
}

/// Compute the ordered, de-duplicated list of filter triples to try.
pub fn plan(filter: &FilterTuple, table: &FilterRelaxationTable) -> Vec<RelaxationStep> {
    let mut candidates = vec![RelaxationStep {
        level: RelaxationLevel::Primary,
        tuple: filter.clone(),
    }];

    for grade in table
        .candidate_grades(filter.grade.as_deref())
        .into_iter()
        .skip(1)
    {
        candidates.push(RelaxationStep {
            level: RelaxationLevel::Grade,
            tuple: filter.with_grade(grade.as_deref()),
        });
    }

    let no_grade = filter.with_grade(None);
    let no_subject = no_grade.without_subject();
    let no_sub_topic = no_subject.without_sub_topic();
    candidates.push(RelaxationStep {
        level: RelaxationLevel::Subject,
        tuple: no_subject,
    });
    candidates.push(RelaxationStep {
        level: RelaxationLevel::SubTopic,
        tuple: no_sub_topic,
    });
    candidates.push(RelaxationStep {
        level: RelaxationLevel::Unfiltered,
        tuple: FilterTuple::unfiltered(),
    });

    let mut seen = HashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|step| seen.insert(step.tuple.clone()))
        .collect()
}

/// Run the cascade against a closure primitive and return only the rows.
///
/// The closure receives `(query, filter, limit)` and is called once per
/// planned step until one returns rows. Primitive errors abort immediately.
pub fn retrieve_with_fallback<F>(
    filter: &RetrievalFilter,
    table: &FilterRelaxationTable,
    retrieve_fn: F,
    limit: usize,
) -> RetrievalResult<Vec<Passage>>
where
    F: FnMut(&str, &FilterTuple, usize) -> RetrievalResult<Vec<Passage>>,
{
    let steps = plan(&filter.tuple(), table);
    run(&filter.query, steps, retrieve_fn, limit).map(|outcome| outcome.passages)
}

/// Retrieval cascade bound to a relaxation table and a per-call row limit.
#[derive(Debug, Clone)]
pub struct RetrievalCascade {
    table: FilterRelaxationTable,
    limit: usize,
}

impl Default for RetrievalCascade {
    fn default() -> Self {
        Self::from_config(&RetrievalConfig::default())
    }
}

impl RetrievalCascade {
    pub fn new(table: FilterRelaxationTable, limit: usize) -> Self {
        Self { table, limit }
    }

    pub fn from_config(config: &RetrievalConfig) -> Self {
        Self::new(
            FilterRelaxationTable::from_config(config),
            config.default_limit,
        )
    }

    /// Same table, different row limit.
    pub fn with_limit(&self, limit: usize) -> Self {
        Self {
            table: self.table.clone(),
            limit,
        }
    }

    pub fn table(&self) -> &FilterRelaxationTable {
        &self.table
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// The steps `retrieve` would try for `filter`, in order.
    pub fn plan(&self, filter: &RetrievalFilter) -> Vec<RelaxationStep> {
        plan(&filter.tuple(), &self.table)
    }

    /// Drive `primitive` through the plan until a level yields rows.
    pub fn retrieve(
        &self,
        filter: &RetrievalFilter,
        primitive: &dyn IPassageRetriever,
    ) -> RetrievalResult<CascadeOutcome> {
        let steps = self.plan(filter);
        run(
            &filter.query,
            steps,
            |query, tuple, limit| primitive.retrieve(query, tuple, limit),
            self.limit,
        )
    }
}

fn run<F>(
    query: &str,
    steps: Vec<RelaxationStep>,
    mut retrieve_fn: F,
    limit: usize,
) -> RetrievalResult<CascadeOutcome>
where
    F: FnMut(&str, &FilterTuple, usize) -> RetrievalResult<Vec<Passage>>,
{
    let mut attempts: Vec<CascadeAttempt> = Vec::with_capacity(steps.len());

    for step in steps {
        let rows = match retrieve_fn(query, &step.tuple, limit) {
            Ok(rows) => rows,
            Err(err) => {
                warn!(
                    level = %step.level,
                    filter = %step.tuple,
                    error = %err,
                    "retrieval primitive failed; aborting cascade"
                );
                return Err(err);
            }
        };
        debug!(
            event = "relaxation_attempted",
            level = %step.level,
            filter = %step.tuple,
            rows = rows.len(),
            "retrieval attempt"
        );
        attempts.push(CascadeAttempt {
            step: step.clone(),
            rows: rows.len(),
        });

        if !rows.is_empty() {
            if step.level != RelaxationLevel::Primary {
                info!(
                    level = %step.level,
                    filter = %step.tuple,
                    attempts = attempts.len(),
                    "retrieval matched after relaxation"
                );
            }
            return Ok(CascadeOutcome {
                passages: rows,
                matched: step,
                attempts,
            });
        }
    }

    warn!(
        query,
        attempts = attempts.len(),
        "no passages matched at any relaxation level"
    );
    Err(RetrievalError::NoMatchingContent {
        attempts: attempts.len(),
    })
}
