use serde::{Deserialize, Serialize};

use crate::node::RoadmapNode;

/// Recursive `{node, children}` snapshot of a roadmap, used for API output
/// and persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoadmapTree {
    pub node: RoadmapNode,
    #[serde(default)]
    pub children: Vec<RoadmapTree>,
}

impl RoadmapTree {
    /// Number of nodes in this subtree, itself included.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(RoadmapTree::node_count).sum::<usize>()
    }

    /// Node ids in preorder.
    pub fn ids(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.node_count());
        self.collect_ids(&mut out);
        out
    }

    fn collect_ids<'a>(&'a self, out: &mut Vec<&'a str>) {
        out.push(self.node.id.as_str());
        for child in &self.children {
            child.collect_ids(out);
        }
    }
}
