//! # GeoTree - In-Memory 2D Spatial Indexing
//!
//! This crate provides a two-dimensional R-tree spatial index mapping
//! axis-aligned envelopes to opaque payloads.
//!
//! ## Features
//!
//! - **Window Queries**: Fast range search with a contained-subtree fast path
//! - **R\*-Style Splits**: Margin-driven axis choice, overlap-driven index choice
//! - **OMT Bulk Loading**: Top-down tile packing for well-filled trees
//! - **Height-Aware Merging**: Bulk loads merge into live trees at the matching level
//! - **Removal with Condense**: Identity-based removal that prunes emptied nodes
//! - **Deterministic**: Single-writer, synchronous, no hidden state
//!
//! ## Quick Start
//!
//! ```rust
//! use geotree::{BoundingBox, RTree};
//!
//! # fn main() -> Result<(), geotree::GeoTreeError> {
//! let mut tree = RTree::new();
//!
//! tree.insert("museum", BoundingBox::new(0.25, 0.25, 0.26, 0.26))?;
//! tree.insert("harbor", BoundingBox::new(0.70, 0.10, 0.72, 0.12))?;
//!
//! let window = BoundingBox::new(0.2, 0.2, 0.3, 0.3);
//! let hits = tree.search(&window)?;
//! assert_eq!(hits.len(), 1);
//! assert_eq!(hits[0].payload, "museum");
//!
//! tree.remove(&"museum", &BoundingBox::new(0.25, 0.25, 0.26, 0.26))?;
//! assert_eq!(tree.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! ## Bulk Loading
//!
//! ```rust
//! use geotree::{BoundingBox, Entry, RTree};
//!
//! # fn main() -> Result<(), geotree::GeoTreeError> {
//! let entries: Vec<Entry<u64>> = (0..1000)
//!     .map(|i| {
//!         let x = (i % 32) as f64;
//!         let y = (i / 32) as f64;
//!         Entry::new(i, BoundingBox::new(x, y, x + 1.0, y + 1.0))
//!     })
//!     .collect();
//!
//! let mut tree = RTree::new();
//! tree.load(entries)?;
//! assert_eq!(tree.len(), 1000);
//! # Ok(())
//! # }
//! ```
//!
//! The tree is single-writer; wrap it in a lock to share it. One tree per
//! owner runs fine in parallel with other trees.

pub mod bounding_box;
pub mod rtree;

pub use bounding_box::BoundingBox;
pub use rtree::{
    Entry, GeoTreeError, GeoTreeResult, Node, NodeKind, RTree, SearchStats, DEFAULT_MAX_ENTRIES,
    MIN_MAX_ENTRIES,
};
