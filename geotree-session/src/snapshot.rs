//! Structural snapshots of a session tree.
//!
//! After each mutation the session produces a depth-first dump of the tree
//! structure for observers (map viewers, debug tooling). Each non-entry
//! node is reported with a path-based identifier, its height, and its
//! rectangle projected back into degrees. Entries themselves are not part
//! of the dump.

use serde::{Deserialize, Serialize};

use geotree::{BoundingBox, Node};

use crate::projection::unproject_bbox;

/// One node of the structural dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    /// Path-based identifier, `"0"` for the root, `"0.2.1"` for the second
    /// child of the third child of the root. Assigned at dump time; the
    /// index core carries no identifiers.
    pub id: String,
    /// Node height; leaves are 1.
    pub height: u32,
    /// Node envelope in longitude/latitude degrees.
    pub bounds: BoundingBox,
}

/// A depth-first structural dump of one session tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeSnapshot {
    /// Number of entries indexed when the snapshot was taken.
    pub entry_count: usize,
    /// Nodes in DFS pre-order; empty for an empty tree.
    pub nodes: Vec<NodeSnapshot>,
}

impl TreeSnapshot {
    /// Captures the structure of a tree.
    ///
    /// The root of an empty tree is skipped so observers see an empty dump
    /// rather than a node with an inverted rectangle.
    pub fn capture<T>(root: &Node<T>, entry_count: usize) -> Self {
        let mut nodes = Vec::new();
        if !root.is_empty() {
            capture_node(root, "0".to_string(), &mut nodes);
        }
        Self { entry_count, nodes }
    }

    /// Serializes the snapshot as JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn capture_node<T>(node: &Node<T>, id: String, out: &mut Vec<NodeSnapshot>) {
    out.push(NodeSnapshot {
        id: id.clone(),
        height: node.height(),
        bounds: unproject_bbox(node.bbox()),
    });

    for (index, child) in node.children().iter().enumerate() {
        capture_node(child, format!("{}.{}", id, index), out);
    }
}
