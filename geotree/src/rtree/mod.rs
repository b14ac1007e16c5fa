//! The R-tree index: types, constants, and the tree implementation.

pub mod rtree_constants;
pub mod rtree_impl;
pub mod rtree_types;

pub use rtree_constants::{DEFAULT_MAX_ENTRIES, MIN_MAX_ENTRIES};
pub use rtree_impl::RTree;
pub use rtree_types::{Entry, GeoTreeError, GeoTreeResult, Node, NodeKind, SearchStats};
