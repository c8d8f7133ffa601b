//! ErrorCode trait for the transport boundary.

/// Every error enum provides a stable machine-readable code so the
/// transport layer can translate failures without matching on messages.
pub trait ErrorCode {
    /// Returns the error code string (e.g., "NO_MATCHING_CONTENT").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted boundary string: `[ERROR_CODE] message`.
    fn boundary_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

// Error code constants for the transport boundary.
pub const EMBEDDING_UNAVAILABLE: &str = "EMBEDDING_UNAVAILABLE";
pub const STORAGE_UNAVAILABLE: &str = "STORAGE_UNAVAILABLE";
pub const NO_MATCHING_CONTENT: &str = "NO_MATCHING_CONTENT";
pub const NODE_NOT_FOUND: &str = "NODE_NOT_FOUND";
pub const CYCLE_DETECTED: &str = "CYCLE_DETECTED";
pub const ROADMAP_ERROR: &str = "ROADMAP_ERROR";
pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
pub const MALFORMED_GENERATION_OUTPUT: &str = "MALFORMED_GENERATION_OUTPUT";
pub const GENERATION_UNAVAILABLE: &str = "GENERATION_UNAVAILABLE";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const SERIALIZATION_ERROR: &str = "SERIALIZATION_ERROR";
pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
