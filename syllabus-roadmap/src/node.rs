use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};

use syllabus_core::constants::RESOURCE_TYPE_PASSAGE;

/// What a resource points at. Unknown type strings are kept verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ResourceKind {
    #[default]
    Passage,
    Problem,
    Video,
    Other(String),
}

impl ResourceKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Passage => RESOURCE_TYPE_PASSAGE,
            Self::Problem => "problem",
            Self::Video => "video",
            Self::Other(kind) => kind,
        }
    }
}

impl From<String> for ResourceKind {
    fn from(kind: String) -> Self {
        match kind.trim() {
            RESOURCE_TYPE_PASSAGE => Self::Passage,
            "problem" => Self::Problem,
            "video" => Self::Video,
            _ => Self::Other(kind),
        }
    }
}

impl From<ResourceKind> for String {
    fn from(kind: ResourceKind) -> Self {
        match kind {
            ResourceKind::Other(kind) => kind,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reference from a roadmap node to external material.
///
/// Only identifiers and metadata are copied; the passage itself is not owned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapResource {
    #[serde(rename = "type", default)]
    pub kind: ResourceKind,
    pub label: String,
    pub source_id: String,
    #[serde(default)]
    pub metadata: BTreeMap<String, serde_json::Value>,
}

impl RoadmapResource {
    pub fn passage(label: impl Into<String>, source_id: impl Into<String>) -> Self {
        Self {
            kind: ResourceKind::Passage,
            label: label.into(),
            source_id: source_id.into(),
            metadata: BTreeMap::new(),
        }
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.metadata.insert(key.into(), value);
        self
    }
}

/// A single roadmap node.
///
/// `parent_id` and `child_ids` are owned by [`crate::Roadmap`]: they are
/// cleared on insertion and only changed through `link`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapNode {
    #[serde(alias = "node_id")]
    pub id: String,
    pub title: String,
    pub objective: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub achievement_codes: BTreeSet<String>,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub child_ids: Vec<String>,
    #[serde(default)]
    pub resources: Vec<RoadmapResource>,
}

impl RoadmapNode {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        objective: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            objective: objective.into(),
            summary: None,
            difficulty: None,
            achievement_codes: BTreeSet::new(),
            parent_id: None,
            child_ids: Vec::new(),
            resources: Vec::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_difficulty(mut self, difficulty: Option<String>) -> Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_achievement_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.achievement_codes.extend(codes.into_iter().map(Into::into));
        self
    }

    pub fn with_resources(mut self, resources: Vec<RoadmapResource>) -> Self {
        self.resources = resources;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.child_ids.is_empty()
    }

    pub(crate) fn attach_child(&mut self, child_id: &str) {
        if !self.child_ids.iter().any(|c| c == child_id) {
            self.child_ids.push(child_id.to_string());
        }
    }

    pub(crate) fn detach_child(&mut self, child_id: &str) {
        self.child_ids.retain(|c| c != child_id);
    }
}

/// Content-field patch applied by `Roadmap::update_node`.
///
/// Ids and links are deliberately absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NodeUpdate {
    pub title: Option<String>,
    pub objective: Option<String>,
    pub summary: Option<Option<String>>,
    pub difficulty: Option<Option<String>>,
    pub achievement_codes: Option<BTreeSet<String>>,
    pub resources: Option<Vec<RoadmapResource>>,
}

impl NodeUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn objective(mut self, objective: impl Into<String>) -> Self {
        self.objective = Some(objective.into());
        self
    }

    pub fn summary(mut self, summary: Option<String>) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn difficulty(mut self, difficulty: Option<String>) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    pub fn achievement_codes<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.achievement_codes = Some(codes.into_iter().map(Into::into).collect());
        self
    }

    pub fn resources(mut self, resources: Vec<RoadmapResource>) -> Self {
        self.resources = Some(resources);
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn apply(self, node: &mut RoadmapNode) {
        if let Some(title) = self.title {
            node.title = title;
        }
        if let Some(objective) = self.objective {
            node.objective = objective;
        }
        if let Some(summary) = self.summary {
            node.summary = summary;
        }
        if let Some(difficulty) = self.difficulty {
            node.difficulty = difficulty;
        }
        if let Some(codes) = self.achievement_codes {
            node.achievement_codes = codes;
        }
        if let Some(resources) = self.resources {
            node.resources = resources;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_kind_serializes_as_type() {
        let resource = RoadmapResource::passage("a.pdf", "a.pdf");
        let json = serde_json::to_value(&resource).unwrap();
        assert_eq!(json["type"], "passage");
        assert_eq!(json["source_id"], "a.pdf");
    }

    #[test]
    fn unknown_resource_type_survives_a_round_trip() {
        let resource: RoadmapResource = serde_json::from_value(serde_json::json!({
            "type": "worksheet",
            "label": "연습지",
            "source_id": "ws-1"
        }))
        .unwrap();
        assert_eq!(resource.kind, ResourceKind::Other("worksheet".to_string()));
        assert_eq!(serde_json::to_value(&resource).unwrap()["type"], "worksheet");

        let video: ResourceKind = serde_json::from_value(serde_json::json!("video")).unwrap();
        assert_eq!(video, ResourceKind::Video);
    }

    #[test]
    fn achievement_codes_serialize_sorted() {
        let node = RoadmapNode::new("n", "t", "o").with_achievement_codes(["b", "a", "b"]);
        let json = serde_json::to_value(&node).unwrap();
        assert_eq!(json["achievement_codes"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn legacy_node_id_field_is_accepted() {
        let node: RoadmapNode =
            serde_json::from_str(r#"{"node_id": "x", "title": "t", "objective": "o"}"#).unwrap();
        assert_eq!(node.id, "x");
        assert!(node.child_ids.is_empty());
    }

    #[test]
    fn attach_child_keeps_entries_unique() {
        let mut node = RoadmapNode::new("p", "t", "o");
        node.attach_child("c");
        node.attach_child("c");
        assert_eq!(node.child_ids, vec!["c".to_string()]);
        node.detach_child("c");
        assert!(node.is_leaf());
    }

    #[test]
    fn update_touches_only_named_fields() {
        let mut node = RoadmapNode::new("n", "old", "keep").with_summary("s");
        NodeUpdate::new().title("new").summary(None).apply(&mut node);
        assert_eq!(node.title, "new");
        assert_eq!(node.objective, "keep");
        assert_eq!(node.summary, None);
        assert!(NodeUpdate::new().is_empty());
    }
}
