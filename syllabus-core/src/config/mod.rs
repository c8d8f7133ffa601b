pub mod defaults;
pub mod embedding_config;
pub mod generation_config;
pub mod observability_config;
pub mod retrieval_config;
pub mod roadmap_config;
pub mod storage_config;
pub mod syllabus_config;
pub mod validation_config;

pub use embedding_config::EmbeddingConfig;
pub use generation_config::GenerationConfig;
pub use observability_config::ObservabilityConfig;
pub use retrieval_config::RetrievalConfig;
pub use roadmap_config::RoadmapConfig;
pub use storage_config::StorageConfig;
pub use syllabus_config::SyllabusConfig;
pub use validation_config::ValidationConfig;
