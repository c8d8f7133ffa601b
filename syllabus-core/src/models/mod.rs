pub mod filter;
pub mod passage;

pub use filter::{FilterTuple, RetrievalFilter};
pub use passage::Passage;
