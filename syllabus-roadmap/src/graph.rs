//! Id-indexed roadmap graph.
//!
//! Nodes live in a map keyed by id and are shared as `Arc` snapshots.
//! Mutations go through `Arc::make_mut`, so any snapshot handed out before an
//! edit keeps its old contents. The graph is a tree: every link is checked for
//! cycles before it is made, and a child has at most one parent.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use syllabus_core::errors::{RoadmapError, RoadmapResult};

use crate::node::{NodeUpdate, RoadmapNode};
use crate::tree::RoadmapTree;

#[derive(Debug, Clone, Default)]
pub struct Roadmap {
    nodes: BTreeMap<String, Arc<RoadmapNode>>,
    root_id: Option<String>,
}

impl Roadmap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn root_id(&self) -> Option<&str> {
        self.root_id.as_deref()
    }

    pub fn root(&self) -> Option<Arc<RoadmapNode>> {
        self.root_id.as_deref().and_then(|id| self.nodes.get(id).cloned())
    }

    /// All nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = &Arc<RoadmapNode>> {
        self.nodes.values()
    }

    /// Insert a node. The first node, or any node inserted with `as_root`,
    /// becomes the root. Links on the incoming node are discarded.
    pub fn add_node(&mut self, mut node: RoadmapNode, as_root: bool) -> RoadmapResult<()> {
        if self.nodes.contains_key(&node.id) {
            return Err(RoadmapError::DuplicateNode { id: node.id });
        }
        node.parent_id = None;
        node.child_ids.clear();
        if self.root_id.is_none() || as_root {
            self.root_id = Some(node.id.clone());
        }
        self.nodes.insert(node.id.clone(), Arc::new(node));
        Ok(())
    }

    /// Make `child_id` a child of `parent_id`, detaching it from any previous parent.
    pub fn link(&mut self, parent_id: &str, child_id: &str) -> RoadmapResult<()> {
        self.require(parent_id)?;
        let previous = self.require(child_id)?.parent_id.clone();

        if parent_id == child_id || self.is_ancestor(child_id, parent_id) {
            return Err(RoadmapError::CycleDetected {
                parent: parent_id.to_string(),
                child: child_id.to_string(),
            });
        }

        if let Some(previous) = previous.filter(|p| p != parent_id) {
            self.node_mut(&previous)?.detach_child(child_id);
        }
        self.node_mut(parent_id)?.attach_child(child_id);
        self.node_mut(child_id)?.parent_id = Some(parent_id.to_string());
        Ok(())
    }

    /// Snapshot of a node. Later edits are not visible through it.
    pub fn get_node(&self, id: &str) -> RoadmapResult<Arc<RoadmapNode>> {
        self.require(id).cloned()
    }

    /// Children in link order.
    pub fn get_children(&self, id: &str) -> RoadmapResult<Vec<Arc<RoadmapNode>>> {
        self.require(id)?
            .child_ids
            .iter()
            .map(|child| self.get_node(child))
            .collect()
    }

    /// Ancestors from the parent up to the root.
    pub fn get_ancestors(&self, id: &str) -> RoadmapResult<Vec<Arc<RoadmapNode>>> {
        let mut ancestors = Vec::new();
        let mut current = self.require(id)?;
        while let Some(parent_id) = current.parent_id.as_deref() {
            let parent = self.require(parent_id)?;
            if ancestors.len() >= self.nodes.len() {
                return Err(RoadmapError::IntegrityViolation {
                    details: format!("parent chain of {id} does not terminate"),
                });
            }
            ancestors.push(parent.clone());
            current = parent;
        }
        Ok(ancestors)
    }

    /// Lazy preorder walk from `start`, or from the root when `None`.
    /// Each call starts a fresh traversal.
    pub fn depth_first(&self, start: Option<&str>) -> RoadmapResult<DepthFirst<'_>> {
        let start = match start {
            Some(id) => Some(self.require(id)?.id.as_str()),
            None => self.root_id.as_deref(),
        };
        Ok(DepthFirst {
            roadmap: self,
            stack: start.into_iter().collect(),
        })
    }

    /// Nested snapshot from `start` (or the root). `None` when there is no root.
    pub fn as_tree(&self, start: Option<&str>) -> RoadmapResult<Option<RoadmapTree>> {
        let start = match start {
            Some(id) => id,
            None => match self.root_id.as_deref() {
                Some(root) => root,
                None => return Ok(None),
            },
        };
        self.subtree(start, 0).map(Some)
    }

    /// The tree snapshot as JSON; `{}` for a roadmap without a root.
    pub fn to_tree_json(&self) -> RoadmapResult<serde_json::Value> {
        match self.as_tree(None)? {
            Some(tree) => {
                serde_json::to_value(tree).map_err(|e| RoadmapError::IntegrityViolation {
                    details: format!("tree serialization failed: {e}"),
                })
            }
            None => Ok(serde_json::Value::Object(serde_json::Map::new())),
        }
    }

    /// Replace content fields of a node. The stored node is swapped for an
    /// edited copy when anyone else still holds the old snapshot.
    pub fn update_node(&mut self, id: &str, update: NodeUpdate) -> RoadmapResult<Arc<RoadmapNode>> {
        let node = self.node_mut(id)?;
        update.apply(node);
        self.get_node(id)
    }

    /// Verify links agree in both directions, every reference resolves, the
    /// root exists, and parent chains terminate.
    pub fn check_integrity(&self) -> RoadmapResult<()> {
        let violation = |details: String| Err(RoadmapError::IntegrityViolation { details });

        match self.root_id.as_deref() {
            Some(root) if !self.nodes.contains_key(root) => {
                return violation(format!("root {root} is not a node"));
            }
            None if !self.nodes.is_empty() => {
                return violation("nodes present but no root designated".to_string());
            }
            _ => {}
        }

        for (id, node) in &self.nodes {
            if id != &node.id {
                return violation(format!("node stored under {id} has id {}", node.id));
            }
            if let Some(parent_id) = node.parent_id.as_deref() {
                let Some(parent) = self.nodes.get(parent_id) else {
                    return violation(format!("{id} points at missing parent {parent_id}"));
                };
                if !parent.child_ids.iter().any(|c| c == id) {
                    return violation(format!("{parent_id} does not list child {id}"));
                }
            }
            let mut seen = HashSet::with_capacity(node.child_ids.len());
            for child_id in &node.child_ids {
                if !seen.insert(child_id.as_str()) {
                    return violation(format!("{id} lists child {child_id} twice"));
                }
                let Some(child) = self.nodes.get(child_id) else {
                    return violation(format!("{id} lists missing child {child_id}"));
                };
                if child.parent_id.as_deref() != Some(id.as_str()) {
                    return violation(format!("{child_id} does not point back at parent {id}"));
                }
            }
            self.get_ancestors(id)?;
        }
        Ok(())
    }

    /// Rebuild a roadmap from a tree snapshot. The tree's nesting defines the
    /// links; stored `child_ids` must agree with it.
    pub fn from_tree(tree: &RoadmapTree) -> RoadmapResult<Self> {
        let mut roadmap = Self::new();
        roadmap.add_node(tree.node.clone(), true)?;
        roadmap.insert_children(tree)?;
        roadmap.check_integrity()?;
        Ok(roadmap)
    }

    fn insert_children(&mut self, tree: &RoadmapTree) -> RoadmapResult<()> {
        let listed: Vec<&str> = tree.children.iter().map(|c| c.node.id.as_str()).collect();
        if !tree.node.child_ids.is_empty() && tree.node.child_ids != listed {
            return Err(RoadmapError::IntegrityViolation {
                details: format!("child_ids of {} disagree with its children", tree.node.id),
            });
        }
        for child in &tree.children {
            self.add_node(child.node.clone(), false)?;
            self.link(&tree.node.id, &child.node.id)?;
            self.insert_children(child)?;
        }
        Ok(())
    }

    fn subtree(&self, id: &str, depth: usize) -> RoadmapResult<RoadmapTree> {
        if depth > self.nodes.len() {
            return Err(RoadmapError::IntegrityViolation {
                details: format!("subtree at {id} is deeper than the node count"),
            });
        }
        let node = self.require(id)?;
        let children = node
            .child_ids
            .iter()
            .map(|child| self.subtree(child, depth + 1))
            .collect::<RoadmapResult<Vec<_>>>()?;
        Ok(RoadmapTree {
            node: RoadmapNode::clone(node),
            children,
        })
    }

    /// Whether `candidate` is `id` itself or one of its ancestors.
    fn is_ancestor(&self, candidate: &str, id: &str) -> bool {
        let mut current = Some(id);
        let mut steps = 0;
        while let Some(node_id) = current {
            if node_id == candidate {
                return true;
            }
            if steps > self.nodes.len() {
                return false;
            }
            steps += 1;
            current = self
                .nodes
                .get(node_id)
                .and_then(|n| n.parent_id.as_deref());
        }
        false
    }

    fn require(&self, id: &str) -> RoadmapResult<&Arc<RoadmapNode>> {
        self.nodes.get(id).ok_or_else(|| RoadmapError::NodeNotFound { id: id.to_string() })
    }

    fn node_mut(&mut self, id: &str) -> RoadmapResult<&mut RoadmapNode> {
        self.nodes
            .get_mut(id)
            .map(Arc::make_mut)
            .ok_or_else(|| RoadmapError::NodeNotFound { id: id.to_string() })
    }
}

/// Preorder iterator returned by [`Roadmap::depth_first`].
pub struct DepthFirst<'a> {
    roadmap: &'a Roadmap,
    stack: Vec<&'a str>,
}

impl<'a> Iterator for DepthFirst<'a> {
    type Item = &'a RoadmapNode;

    fn next(&mut self) -> Option<Self::Item> {
        let roadmap = self.roadmap;
        let id = self.stack.pop()?;
        let node = roadmap.nodes.get(id)?;
        self.stack
            .extend(node.child_ids.iter().rev().map(String::as_str));
        Some(&**node)
    }
}
