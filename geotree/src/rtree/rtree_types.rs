//! Core types for the in-memory R-tree.
//!
//! This module defines the fundamental types used throughout the R-tree:
//! - Error and result types
//! - Leaf entries (envelope + payload)
//! - Node types (Leaf and Internal)
//! - Search statistics

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bounding_box::BoundingBox;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur in index operations.
#[derive(Debug, Error)]
pub enum GeoTreeError {
    /// An envelope with min > max on either axis was handed to the index.
    /// The call fails and the tree is left untouched.
    #[error("invalid envelope: {0}")]
    InvalidEnvelope(BoundingBox),
}

/// Result type for index operations.
pub type GeoTreeResult<T> = Result<T, GeoTreeError>;

// ============================================================================
// Entries and Nodes
// ============================================================================

/// A leaf-level item: an envelope plus an opaque payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry<T> {
    /// The item's bounds.
    pub bbox: BoundingBox,
    /// The indexed value.
    pub payload: T,
}

impl<T> Entry<T> {
    /// Creates a new entry from a payload and its bounds.
    pub fn new(payload: T, bbox: BoundingBox) -> Self {
        Self { bbox, payload }
    }
}

/// The children of a node: payload entries in a leaf, nodes in an internal
/// node. An entry is never promoted to an internal node.
#[derive(Debug, Clone)]
pub enum NodeKind<T> {
    /// Leaf node containing actual entries.
    Leaf { entries: Vec<Entry<T>> },
    /// Internal node containing child nodes.
    Internal { children: Vec<Node<T>> },
}

/// A node of the R-tree.
///
/// Carries the minimum bounding rectangle of everything below it and its
/// height (leaves are height 1). All mutation is performed by
/// [`RTree`](super::RTree); the node surface is read-only so external
/// traversals (structural serialization, invariant checks) cannot disturb
/// the tree.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub(crate) bbox: BoundingBox,
    pub(crate) height: u32,
    pub(crate) kind: NodeKind<T>,
}

impl<T> Node<T> {
    /// Builds a leaf over `entries`, computing its envelope.
    pub(crate) fn new_leaf(entries: Vec<Entry<T>>) -> Self {
        let mut node = Self {
            bbox: BoundingBox::empty(),
            height: 1,
            kind: NodeKind::Leaf { entries },
        };
        node.recompute_bbox();
        node
    }

    /// Builds an internal node over `children`, computing envelope and height.
    pub(crate) fn new_internal(children: Vec<Node<T>>) -> Self {
        debug_assert!(!children.is_empty(), "internal node needs children");
        let height = children.iter().map(|c| c.height).max().unwrap_or(0) + 1;
        let mut node = Self {
            bbox: BoundingBox::empty(),
            height,
            kind: NodeKind::Internal { children },
        };
        node.recompute_bbox();
        node
    }

    /// The minimum bounding rectangle of this node's children.
    pub fn bbox(&self) -> &BoundingBox {
        &self.bbox
    }

    /// Height of this node; leaves are 1.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether this node holds entries rather than child nodes.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf { .. })
    }

    /// Child nodes of an internal node; empty for leaves.
    pub fn children(&self) -> &[Node<T>] {
        match &self.kind {
            NodeKind::Internal { children } => children,
            NodeKind::Leaf { .. } => &[],
        }
    }

    /// Entries of a leaf; empty for internal nodes.
    pub fn entries(&self) -> &[Entry<T>] {
        match &self.kind {
            NodeKind::Leaf { entries } => entries,
            NodeKind::Internal { .. } => &[],
        }
    }

    /// Number of direct children (entries or nodes).
    pub fn len(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf { entries } => entries.len(),
            NodeKind::Internal { children } => children.len(),
        }
    }

    /// Whether the node has no children at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Recomputes the envelope from scratch over all direct children.
    pub(crate) fn recompute_bbox(&mut self) {
        let mut bbox = BoundingBox::empty();
        match &self.kind {
            NodeKind::Leaf { entries } => {
                for entry in entries {
                    bbox.extend(&entry.bbox);
                }
            }
            NodeKind::Internal { children } => {
                for child in children {
                    bbox.extend(&child.bbox);
                }
            }
        }
        self.bbox = bbox;
    }
}

/// Anything that carries an envelope; lets the split machinery treat leaf
/// entries and internal children uniformly.
pub(crate) trait Bounded {
    fn bounds(&self) -> &BoundingBox;
}

impl<T> Bounded for Entry<T> {
    fn bounds(&self) -> &BoundingBox {
        &self.bbox
    }
}

impl<T> Bounded for Node<T> {
    fn bounds(&self) -> &BoundingBox {
        &self.bbox
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Counters reported by [`RTree::search_with_stats`](super::RTree::search_with_stats).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Nodes popped from the traversal stack.
    pub nodes_visited: u64,
    /// Per-entry intersection tests against leaf entries. Zero when the
    /// contained-subtree fast path covered the whole result.
    pub leaf_probes: u64,
}
