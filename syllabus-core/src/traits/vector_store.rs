use crate::errors::StorageError;
use crate::models::{FilterTuple, Passage};

/// Nearest-neighbour search over the passage corpus.
pub trait IVectorStore: Send + Sync {
    /// Return up to `limit` passages matching every non-`None` filter value,
    /// ordered by ascending distance to `vector`.
    fn nearest_neighbors(
        &self,
        vector: &[f32],
        filter: &FilterTuple,
        limit: usize,
    ) -> Result<Vec<Passage>, StorageError>;
}
