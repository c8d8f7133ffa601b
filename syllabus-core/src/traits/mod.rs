pub mod embedding;
pub mod generator;
pub mod retriever;
pub mod vector_store;

pub use embedding::IEmbeddingProvider;
pub use generator::IGenerator;
pub use retriever::IPassageRetriever;
pub use vector_store::IVectorStore;
