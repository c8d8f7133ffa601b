//! Structured log events for the decisions worth auditing.
//!
//! Each function emits a `tracing` event with an `event` field naming it.
//! Per-attempt cascade events are emitted by the cascade itself.

/// The cascade found rows at `level` after `attempts` calls.
pub fn cascade_matched(level: &str, filter: &str, attempts: usize, rows: usize) {
    tracing::info!(
        event = "cascade_matched",
        level = %level,
        filter = %filter,
        attempts = attempts,
        rows = rows,
        "retrieval cascade matched"
    );
}

/// Every relaxation level came back empty.
pub fn cascade_exhausted(query: &str, attempts: usize) {
    tracing::warn!(
        event = "cascade_exhausted",
        query = %query,
        attempts = attempts,
        "retrieval cascade exhausted"
    );
}

pub fn roadmap_built(root_id: &str, nodes: usize, topics: usize) {
    tracing::info!(
        event = "roadmap_built",
        root_id = %root_id,
        nodes = nodes,
        topics = topics,
        "roadmap built"
    );
}

/// Generated content failed parsing or validation and was discarded.
pub fn content_rejected(reason: &str, question: Option<usize>) {
    tracing::warn!(
        event = "content_rejected",
        reason = %reason,
        question = question,
        "generated content rejected"
    );
}

/// The generator failed and a deterministic fallback was used instead.
pub fn feedback_degraded(failure: &str, fallback: &str) {
    tracing::warn!(
        event = "feedback_degraded",
        failure = %failure,
        fallback = %fallback,
        "feedback degraded"
    );
}

/// Supplement topics were appended to an existing roadmap.
pub fn roadmap_updated(root_id: &str, weak_areas: usize, added: usize, nodes: usize) {
    tracing::info!(
        event = "roadmap_updated",
        root_id = %root_id,
        weak_areas = weak_areas,
        added = added,
        nodes = nodes,
        "roadmap updated"
    );
}
