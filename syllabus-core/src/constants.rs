/// Syllabus version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Resource type tag for retrieved passages attached to roadmap nodes.
pub const RESOURCE_TYPE_PASSAGE: &str = "passage";

/// Characters kept from a generated node id suffix.
pub const NODE_ID_SUFFIX_LEN: usize = 6;

/// Marker appended to truncated summaries.
pub const ELLIPSIS: &str = "...";

/// Placeholder used in prompts for unknown metadata.
pub const UNKNOWN_LABEL: &str = "미상";

/// Placeholder used in prompts for unspecified request filters.
pub const UNSPECIFIED_LABEL: &str = "미지정";
