//! # syllabus-roadmap
//!
//! Learning roadmaps as an id-indexed tree: grade root, one subject node,
//! one topic node per sub-topic group, with passage resources on the topics.
//!
//! Nodes are shared `Arc` snapshots. Every edit replaces the node in the map,
//! so references taken earlier keep seeing the old values.

pub mod builder;
pub mod graph;
pub mod node;
pub mod storage;
pub mod tree;

pub use builder::RoadmapBuilder;
pub use graph::{DepthFirst, Roadmap};
pub use node::{NodeUpdate, ResourceKind, RoadmapNode, RoadmapResource};
pub use storage::{load_roadmap, save_roadmap};
pub use tree::RoadmapTree;
