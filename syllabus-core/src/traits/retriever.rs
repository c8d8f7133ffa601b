use crate::errors::RetrievalResult;
use crate::models::{FilterTuple, Passage};

/// The single retrieval primitive the cascade drives.
///
/// One call performs one filtered lookup. Implementations must not retry or
/// relax filters themselves.
pub trait IPassageRetriever: Send + Sync {
    fn retrieve(
        &self,
        query: &str,
        filter: &FilterTuple,
        limit: usize,
    ) -> RetrievalResult<Vec<Passage>>;
}
