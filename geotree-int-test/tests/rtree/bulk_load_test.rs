//! Bulk loading: packed builds, merges by height, insert equivalence.

use geotree::{BoundingBox, Entry, RTree};
use geotree_int_test::test_util::{
    check_invariants, random_box, random_boxes, seeded_rng, sorted_hits,
};

#[test]
fn load_and_insert_answer_queries_identically() {
    let mut rng = seeded_rng(41);
    let boxes = random_boxes(&mut rng, 200, 1.0, 0.1);

    let mut loaded = RTree::new();
    loaded
        .load(
            boxes
                .iter()
                .enumerate()
                .map(|(i, bbox)| Entry::new(i as u32, bbox.clone()))
                .collect(),
        )
        .unwrap();

    let mut inserted = RTree::new();
    for (i, bbox) in boxes.iter().enumerate() {
        inserted.insert(i as u32, bbox.clone()).unwrap();
    }

    assert_eq!(loaded.len(), 200);
    assert_eq!(inserted.len(), 200);
    check_invariants(&loaded, false);
    check_invariants(&inserted, true);

    for _ in 0..50 {
        let window = random_box(&mut rng, 1.0, 0.4);
        let from_loaded = sorted_hits(&loaded.search(&window).unwrap());
        let from_inserted = sorted_hits(&inserted.search(&window).unwrap());
        assert_eq!(from_loaded, from_inserted, "window {} disagrees", window);
    }
}

#[test]
fn load_merges_trees_of_different_heights() {
    let mut rng = seeded_rng(43);

    // Tall tree from a thousand points, short tree from five.
    let mut tall = RTree::new();
    let tall_boxes = random_boxes(&mut rng, 1000, 1.0, 0.01);
    for (i, bbox) in tall_boxes.iter().enumerate() {
        tall.insert(i as u32, bbox.clone()).unwrap();
    }

    let mut short = RTree::new();
    let short_boxes = random_boxes(&mut rng, 5, 1.0, 0.01);
    for (i, bbox) in short_boxes.iter().enumerate() {
        short.insert(1000 + i as u32, bbox.clone()).unwrap();
    }

    let short_entries: Vec<Entry<u32>> =
        short.entries().into_iter().cloned().collect();
    tall.load(short_entries).unwrap();

    assert_eq!(tall.len(), 1005);
    check_invariants(&tall, false);

    let everything = tall.search(&BoundingBox::new(0.0, 0.0, 2.0, 2.0)).unwrap();
    assert_eq!(
        sorted_hits(&everything),
        (0..1005u32).collect::<Vec<_>>(),
        "merged tree must answer with the union of both entry sets"
    );
}

#[test]
fn load_into_shorter_tree_swaps_host() {
    let mut rng = seeded_rng(47);

    let mut tree = RTree::new();
    for i in 0..5u32 {
        tree.insert(i, random_box(&mut rng, 1.0, 0.01)).unwrap();
    }
    let short_height = tree.height();

    let bulk: Vec<Entry<u32>> = random_boxes(&mut rng, 800, 1.0, 0.01)
        .into_iter()
        .enumerate()
        .map(|(i, bbox)| Entry::new(100 + i as u32, bbox))
        .collect();
    tree.load(bulk).unwrap();

    assert!(tree.height() > short_height);
    assert_eq!(tree.len(), 805);
    check_invariants(&tree, false);

    let everything = tree.search(&BoundingBox::new(0.0, 0.0, 2.0, 2.0)).unwrap();
    assert_eq!(everything.len(), 805);
}

#[test]
fn load_of_equal_height_trees_splits_root() {
    let mut rng = seeded_rng(53);

    let mut tree = RTree::new();
    let first: Vec<Entry<u32>> = random_boxes(&mut rng, 100, 1.0, 0.02)
        .into_iter()
        .enumerate()
        .map(|(i, bbox)| Entry::new(i as u32, bbox))
        .collect();
    tree.load(first).unwrap();
    let height_before = tree.height();

    let second: Vec<Entry<u32>> = random_boxes(&mut rng, 100, 1.0, 0.02)
        .into_iter()
        .enumerate()
        .map(|(i, bbox)| Entry::new(100 + i as u32, bbox))
        .collect();
    tree.load(second).unwrap();

    assert_eq!(tree.len(), 200);
    assert!(tree.height() >= height_before);
    check_invariants(&tree, false);

    let everything = tree.search(&BoundingBox::new(0.0, 0.0, 2.0, 2.0)).unwrap();
    assert_eq!(everything.len(), 200);
}

#[test]
fn load_below_min_entries_falls_back_to_inserts() {
    let mut tree = RTree::new();
    tree.insert(0u32, BoundingBox::new(0.0, 0.0, 0.1, 0.1)).unwrap();

    let few: Vec<Entry<u32>> = (1..4u32)
        .map(|i| {
            let x = i as f64 * 0.2;
            Entry::new(i, BoundingBox::new(x, x, x + 0.1, x + 0.1))
        })
        .collect();
    tree.load(few).unwrap();

    assert_eq!(tree.len(), 4);
    assert_eq!(tree.height(), 1, "four entries fit in the root leaf");
    check_invariants(&tree, true);
}
