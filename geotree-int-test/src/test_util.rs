//! Test utilities: random data generation, a brute-force reference index,
//! and a structural invariant checker.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use geotree::{BoundingBox, Node, RTree};

/// Deterministic RNG so test failures reproduce.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// A random box inside `[0, extent]²` with edges up to `max_size` long.
pub fn random_box(rng: &mut StdRng, extent: f64, max_size: f64) -> BoundingBox {
    let x = rng.gen_range(0.0..extent);
    let y = rng.gen_range(0.0..extent);
    let w = rng.gen_range(0.0..max_size);
    let h = rng.gen_range(0.0..max_size);
    BoundingBox::new(x, y, x + w, y + h)
}

/// `count` random boxes inside `[0, extent]²`.
pub fn random_boxes(rng: &mut StdRng, count: usize, extent: f64, max_size: f64) -> Vec<BoundingBox> {
    (0..count).map(|_| random_box(rng, extent, max_size)).collect()
}

/// Brute-force linear-scan index used as the ground truth for window
/// queries.
#[derive(Default)]
pub struct ReferenceIndex<T> {
    items: Vec<(T, BoundingBox)>,
}

impl<T: Clone + PartialEq> ReferenceIndex<T> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    pub fn insert(&mut self, payload: T, bbox: BoundingBox) {
        self.items.push((payload, bbox));
    }

    /// Removes the first item with an equal payload.
    pub fn remove(&mut self, payload: &T) -> Option<BoundingBox> {
        let index = self.items.iter().position(|(p, _)| p == payload)?;
        Some(self.items.remove(index).1)
    }

    pub fn bbox_of(&self, payload: &T) -> Option<&BoundingBox> {
        self.items.iter().find(|(p, _)| p == payload).map(|(_, b)| b)
    }

    pub fn search(&self, window: &BoundingBox) -> Vec<T> {
        self.items
            .iter()
            .filter(|(_, bbox)| bbox.intersects(window))
            .map(|(payload, _)| payload.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Asserts the structural invariants of a tree:
///
/// 1. all leaves at the same depth (uniform child heights),
/// 2. fan-out within `[1, max_entries]` for non-root nodes, and at least
///    `min_entries` when `expect_min_fill` is set (pure insertion
///    sequences guarantee min fill; bulk loads and condense do not),
/// 3. every envelope equal to the MBR of its children, within tolerance.
pub fn check_invariants<T>(tree: &RTree<T>, expect_min_fill: bool) {
    check_node(
        tree.root(),
        true,
        tree.max_entries(),
        tree.min_entries(),
        expect_min_fill,
    );
}

fn check_node<T>(
    node: &Node<T>,
    is_root: bool,
    max_entries: usize,
    min_entries: usize,
    expect_min_fill: bool,
) {
    assert!(
        node.len() <= max_entries,
        "node holds {} children, max is {}",
        node.len(),
        max_entries
    );
    if !is_root {
        assert!(!node.is_empty(), "non-root node has no children");
        if expect_min_fill {
            assert!(
                node.len() >= min_entries,
                "node holds {} children, min is {}",
                node.len(),
                min_entries
            );
        }
    }

    let mut expected = BoundingBox::empty();
    if node.is_leaf() {
        assert_eq!(node.height(), 1, "leaf at height {}", node.height());
        for entry in node.entries() {
            expected.extend(&entry.bbox);
        }
    } else {
        for child in node.children() {
            assert_eq!(
                child.height() + 1,
                node.height(),
                "child height {} under node height {}",
                child.height(),
                node.height()
            );
            expected.extend(child.bbox());
            check_node(child, false, max_entries, min_entries, expect_min_fill);
        }
    }

    if !node.is_empty() {
        assert_boxes_close(node.bbox(), &expected);
    }
}

fn assert_boxes_close(actual: &BoundingBox, expected: &BoundingBox) {
    const EPS: f64 = 1e-12;
    assert!(
        (actual.min_x - expected.min_x).abs() <= EPS
            && (actual.min_y - expected.min_y).abs() <= EPS
            && (actual.max_x - expected.max_x).abs() <= EPS
            && (actual.max_y - expected.max_y).abs() <= EPS,
        "envelope {} differs from MBR of children {}",
        actual,
        expected
    );
}

/// Sorted payload list from a search result, for set comparisons.
pub fn sorted_hits<T: Clone + Ord>(hits: &[&geotree::Entry<T>]) -> Vec<T> {
    let mut ids: Vec<T> = hits.iter().map(|e| e.payload.clone()).collect();
    ids.sort();
    ids
}

/// Sorts a plain payload list, for set comparisons against the reference.
pub fn sorted_ids<T: Ord>(mut ids: Vec<T>) -> Vec<T> {
    ids.sort();
    ids
}
