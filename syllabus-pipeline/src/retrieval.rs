//! Cascade execution with spans, audit events, and query logging.

use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use syllabus_core::errors::{RetrievalError, SyllabusResult};
use syllabus_core::models::RetrievalFilter;
use syllabus_core::traits::IPassageRetriever;
use syllabus_observability::{cascade_span, events, QueryLog, QueryLogEntry};
use syllabus_retrieval::{CascadeOutcome, RetrievalCascade};

pub(crate) fn run_cascade(
    cascade: &RetrievalCascade,
    filter: &RetrievalFilter,
    retriever: &dyn IPassageRetriever,
    query_log: Option<&Mutex<QueryLog>>,
) -> SyllabusResult<CascadeOutcome> {
    let span = cascade_span!(filter.query, filter.tuple());
    let _guard = span.enter();
    let started = Instant::now();

    let result = cascade.retrieve(filter, retriever);

    let entry = match &result {
        Ok(outcome) => {
            events::cascade_matched(
                &outcome.matched.level.to_string(),
                &outcome.matched.tuple.to_string(),
                outcome.attempts.len(),
                outcome.passages.len(),
            );
            Some(QueryLogEntry::new(
                filter.query.clone(),
                Some(outcome.matched.tuple.to_string()),
                outcome.attempts.len(),
                started.elapsed(),
                outcome.passages.len(),
            ))
        }
        Err(RetrievalError::NoMatchingContent { attempts }) => {
            events::cascade_exhausted(&filter.query, *attempts);
            Some(QueryLogEntry::new(
                filter.query.clone(),
                None,
                *attempts,
                started.elapsed(),
                0,
            ))
        }
        // Transport failures are not retrieval statistics.
        Err(_) => None,
    };

    if let (Some(entry), Some(log)) = (entry, query_log) {
        // Entries are plain data, so a poisoned log is still usable.
        log.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .record(entry);
    }
    result.map_err(Into::into)
}
