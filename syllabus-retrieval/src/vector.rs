//! Retrieval primitive over an embedding provider and a vector store.

use tracing::debug;

use syllabus_core::errors::{RetrievalError, RetrievalResult};
use syllabus_core::models::{FilterTuple, Passage};
use syllabus_core::traits::{IEmbeddingProvider, IPassageRetriever, IVectorStore};

/// Embeds the query once per call and asks the store for the nearest rows
/// matching the filter. No retries and no relaxation happen here.
pub struct VectorRetriever<'a> {
    embedder: &'a dyn IEmbeddingProvider,
    store: &'a dyn IVectorStore,
}

impl<'a> VectorRetriever<'a> {
    pub fn new(embedder: &'a dyn IEmbeddingProvider, store: &'a dyn IVectorStore) -> Self {
        Self { embedder, store }
    }

    fn embed(&self, query: &str) -> RetrievalResult<Vec<f32>> {
        let vector = self
            .embedder
            .embed(query)
            .map_err(|e| RetrievalError::EmbeddingUnavailable {
                reason: e.to_string(),
            })?;

        if vector.is_empty() {
            return Err(RetrievalError::EmbeddingUnavailable {
                reason: format!("{} returned an empty vector", self.embedder.name()),
            });
        }
        if vector.iter().any(|v| !v.is_finite()) {
            return Err(RetrievalError::EmbeddingUnavailable {
                reason: format!("{} returned non-finite components", self.embedder.name()),
            });
        }
        let expected = self.embedder.dimensions();
        if expected > 0 && vector.len() != expected {
            return Err(RetrievalError::EmbeddingUnavailable {
                reason: format!(
                    "dimension mismatch: expected {expected}, got {}",
                    vector.len()
                ),
            });
        }
        Ok(vector)
    }
}

impl IPassageRetriever for VectorRetriever<'_> {
    fn retrieve(
        &self,
        query: &str,
        filter: &FilterTuple,
        limit: usize,
    ) -> RetrievalResult<Vec<Passage>> {
        let vector = self.embed(query)?;
        let rows = self
            .store
            .nearest_neighbors(&vector, filter, limit)
            .map_err(|e| RetrievalError::StorageUnavailable {
                reason: e.to_string(),
            })?;
        debug!(
            provider = self.embedder.name(),
            filter = %filter,
            rows = rows.len(),
            "vector lookup"
        );
        Ok(rows)
    }
}
