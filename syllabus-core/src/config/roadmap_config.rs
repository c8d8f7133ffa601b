use serde::{Deserialize, Serialize};

use super::defaults;

/// Roadmap construction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadmapConfig {
    /// Maximum characters in a topic summary, ellipsis included.
    pub summary_char_budget: usize,
    /// Passage resources attached per topic node.
    pub max_resources_per_topic: usize,
    /// Root title used when the request carries no grade.
    pub default_root_title: String,
    /// Subject title used when the request carries no subject.
    pub default_subject_title: String,
    /// Group label for passages without a sub-topic.
    pub default_topic_label: String,
    /// Resource label for passages without a source name.
    pub default_resource_label: String,
}

impl Default for RoadmapConfig {
    fn default() -> Self {
        Self {
            summary_char_budget: defaults::DEFAULT_SUMMARY_CHAR_BUDGET,
            max_resources_per_topic: defaults::DEFAULT_MAX_RESOURCES_PER_TOPIC,
            default_root_title: defaults::DEFAULT_ROOT_TITLE.to_string(),
            default_subject_title: defaults::DEFAULT_SUBJECT_TITLE.to_string(),
            default_topic_label: defaults::DEFAULT_TOPIC_LABEL.to_string(),
            default_resource_label: defaults::DEFAULT_RESOURCE_LABEL.to_string(),
        }
    }
}
