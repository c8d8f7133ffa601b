//! In-memory stand-ins for the external collaborators.

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use syllabus_core::errors::{
    EmbeddingError, GenerationError, RetrievalError, RetrievalResult, StorageError,
};
use syllabus_core::models::{FilterTuple, Passage};
use syllabus_core::traits::{IEmbeddingProvider, IGenerator, IPassageRetriever, IVectorStore};

/// One recorded call to a [`ScriptedRetriever`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrieverCall {
    pub query: String,
    pub filter: FilterTuple,
    pub limit: usize,
}

/// Retrieval primitive answering from a fixed `filter → rows` table.
///
/// Unknown filters return no rows. Every call is recorded.
#[derive(Default)]
pub struct ScriptedRetriever {
    rows: HashMap<FilterTuple, Vec<Passage>>,
    failure: Option<RetrievalError>,
    calls: Mutex<Vec<RetrieverCall>>,
}

impl ScriptedRetriever {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rows(mut self, filter: FilterTuple, rows: Vec<Passage>) -> Self {
        self.rows.insert(filter, rows);
        self
    }

    /// Every call fails with `error`.
    pub fn failing(error: RetrievalError) -> Self {
        Self {
            failure: Some(error),
            ..Self::default()
        }
    }

    pub fn calls(&self) -> Vec<RetrieverCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or_default()
    }

    pub fn filters(&self) -> Vec<FilterTuple> {
        self.calls().into_iter().map(|c| c.filter).collect()
    }
}

impl IPassageRetriever for ScriptedRetriever {
    fn retrieve(
        &self,
        query: &str,
        filter: &FilterTuple,
        limit: usize,
    ) -> RetrievalResult<Vec<Passage>> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RetrieverCall {
                query: query.to_string(),
                filter: filter.clone(),
                limit,
            });
        }
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }
        let mut rows = self.rows.get(filter).cloned().unwrap_or_default();
        rows.truncate(limit);
        Ok(rows)
    }
}

/// Embedder that returns the same vector for every input.
pub struct FixedEmbedder {
    vector: Vec<f32>,
    dimensions: usize,
}

impl FixedEmbedder {
    /// A unit vector of `dimensions` components.
    pub fn new(dimensions: usize) -> Self {
        let mut vector = vec![0.0; dimensions];
        if let Some(first) = vector.first_mut() {
            *first = 1.0;
        }
        Self { vector, dimensions }
    }

    /// Return `vector` verbatim while still reporting `dimensions`.
    pub fn returning(vector: Vec<f32>, dimensions: usize) -> Self {
        Self { vector, dimensions }
    }
}

impl IEmbeddingProvider for FixedEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Ok(self.vector.clone())
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    fn name(&self) -> &str {
        "fixed"
    }
}

/// Embedder whose every request fails.
pub struct FailingEmbedder;

impl IEmbeddingProvider for FailingEmbedder {
    fn embed(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::RequestFailed {
            model: "failing".to_string(),
            reason: "service unreachable".to_string(),
        })
    }

    fn dimensions(&self) -> usize {
        0
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Brute-force vector store over `(vector, passage)` rows.
#[derive(Default)]
pub struct MemoryVectorStore {
    rows: Vec<(Vec<f32>, Passage)>,
    unavailable: bool,
}

impl MemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, vector: Vec<f32>, passage: Passage) {
        self.rows.push((vector, passage));
    }

    /// A store whose every query fails.
    pub fn unavailable() -> Self {
        Self {
            rows: Vec::new(),
            unavailable: true,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn matches(expected: &Option<String>, actual: &Option<String>) -> bool {
    match expected {
        Some(value) => actual.as_deref() == Some(value.as_str()),
        None => true,
    }
}

fn l2_distance(a: &[f32], b: &[f32]) -> f64 {
    a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = f64::from(*x) - f64::from(*y);
            d * d
        })
        .sum::<f64>()
        .sqrt()
}

impl IVectorStore for MemoryVectorStore {
    fn nearest_neighbors(
        &self,
        vector: &[f32],
        filter: &FilterTuple,
        limit: usize,
    ) -> Result<Vec<Passage>, StorageError> {
        if self.unavailable {
            return Err(StorageError::ConnectionFailed {
                reason: "connection refused".to_string(),
            });
        }
        let mut hits: Vec<Passage> = self
            .rows
            .iter()
            .filter(|(_, p)| {
                matches(&filter.grade, &p.grade)
                    && matches(&filter.subject, &p.subject)
                    && matches(&filter.sub_topic, &p.sub_topic)
            })
            .map(|(v, p)| {
                let mut hit = p.clone();
                hit.distance = l2_distance(vector, v);
                hit
            })
            .collect();
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits.truncate(limit);
        Ok(hits)
    }
}

/// One recorded generator request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorCall {
    pub system_prompt: String,
    pub user_prompt: String,
}

/// Generator replaying queued responses in order. An empty queue answers
/// with `GenerationUnavailable`.
#[derive(Default)]
pub struct ScriptedGenerator {
    responses: Mutex<VecDeque<Result<serde_json::Value, GenerationError>>>,
    calls: Mutex<Vec<GeneratorCall>>,
}

impl ScriptedGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond_with(self, value: serde_json::Value) -> Self {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(Ok(value));
        }
        self
    }

    pub fn fail_with(self, error: GenerationError) -> Self {
        if let Ok(mut queue) = self.responses.lock() {
            queue.push_back(Err(error));
        }
        self
    }

    pub fn calls(&self) -> Vec<GeneratorCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl IGenerator for ScriptedGenerator {
    fn complete_json(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<serde_json::Value, GenerationError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(GeneratorCall {
                system_prompt: system_prompt.to_string(),
                user_prompt: user_prompt.to_string(),
            });
        }
        self.responses
            .lock()
            .ok()
            .and_then(|mut queue| queue.pop_front())
            .unwrap_or_else(|| {
                Err(GenerationError::GenerationUnavailable {
                    reason: "no scripted response left".to_string(),
                })
            })
    }
}
