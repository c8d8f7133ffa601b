use crate::errors::GenerationError;

/// Text-generation collaborator that answers with a JSON document.
pub trait IGenerator: Send + Sync {
    fn complete_json(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<serde_json::Value, GenerationError>;
}
