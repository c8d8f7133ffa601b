//! Retrieval query log: query text, matched filter, attempts, latency, result count.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// A single retrieval request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryLogEntry {
    pub query: String,
    /// Display form of the filter that produced rows; `None` when exhausted.
    pub matched_filter: Option<String>,
    pub attempts: usize,
    pub latency: Duration,
    pub result_count: usize,
    pub timestamp_epoch_ms: i64,
}

impl QueryLogEntry {
    /// Create a new entry with the timestamp set to now.
    pub fn new(
        query: impl Into<String>,
        matched_filter: Option<String>,
        attempts: usize,
        latency: Duration,
        result_count: usize,
    ) -> Self {
        Self {
            query: query.into(),
            matched_filter,
            attempts,
            latency,
            result_count,
            timestamp_epoch_ms: chrono::Utc::now().timestamp_millis(),
        }
    }

    pub fn matched(&self) -> bool {
        self.matched_filter.is_some()
    }
}

/// Bounded in-memory log; the oldest entries are dropped first.
#[derive(Debug, Clone)]
pub struct QueryLog {
    entries: Vec<QueryLogEntry>,
    max_entries: usize,
}

impl Default for QueryLog {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryLog {
    pub fn new() -> Self {
        Self::with_capacity(10_000)
    }

    pub fn with_capacity(max_entries: usize) -> Self {
        Self {
            entries: Vec::new(),
            max_entries,
        }
    }

    pub fn record(&mut self, entry: QueryLogEntry) {
        tracing::debug!(
            event = "query_logged",
            query = %entry.query,
            matched_filter = ?entry.matched_filter,
            attempts = entry.attempts,
            latency_ms = entry.latency.as_millis() as u64,
            result_count = entry.result_count,
            "query logged"
        );

        self.entries.push(entry);
        if self.entries.len() > self.max_entries {
            self.entries.drain(..self.entries.len() - self.max_entries);
        }
    }

    pub fn entries(&self) -> &[QueryLogEntry] {
        &self.entries
    }

    pub fn count(&self) -> usize {
        self.entries.len()
    }

    pub fn avg_latency(&self) -> Duration {
        if self.entries.is_empty() {
            return Duration::ZERO;
        }
        let total: Duration = self.entries.iter().map(|e| e.latency).sum();
        total / self.entries.len() as u32
    }

    /// Mean number of primitive calls per request.
    pub fn avg_attempts(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let total: usize = self.entries.iter().map(|e| e.attempts).sum();
        total as f64 / self.entries.len() as f64
    }

    /// Fraction of requests that needed no relaxation.
    pub fn primary_hit_rate(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let hits = self
            .entries
            .iter()
            .filter(|e| e.matched() && e.attempts == 1)
            .count();
        hits as f64 / self.entries.len() as f64
    }

    /// Fraction of requests that ended without content.
    pub fn exhaustion_rate(&self) -> f64 {
        if self.entries.is_empty() {
            return 0.0;
        }
        let misses = self.entries.iter().filter(|e| !e.matched()).count();
        misses as f64 / self.entries.len() as f64
    }
}
