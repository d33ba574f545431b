//! B+ tree integration tests: bulk-load shape, range scans over a large
//! key set, and rebuild-based range deletion.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use statline_common::RecordPointer;
use statline_index::{BPlusTree, MAX_KEYS};
use tempfile::tempdir;

const ENTRY_COUNT: usize = 26_651;

fn entries() -> Vec<(f32, RecordPointer)> {
    (0..ENTRY_COUNT)
        .map(|i| {
            let key = i as f32 / ENTRY_COUNT as f32;
            let ptr = RecordPointer::new((i / 92) as i32, (i % 92) as i32);
            (key, ptr)
        })
        .collect()
}

#[test]
fn bulk_load_height_three_with_small_root() {
    let dir = tempdir().unwrap();
    let mut tree = BPlusTree::open(dir.path().join("bptree.bin")).unwrap();

    // Shuffle to prove the load sorts; seeded so the test is stable.
    let mut data = entries();
    let mut rng = rand::rngs::StdRng::seed_from_u64(42);
    data.shuffle(&mut rng);

    tree.bulk_load(&data).unwrap();

    assert_eq!(tree.num_levels().unwrap(), 3);
    let root_keys = tree.root_keys().unwrap();
    assert!(
        (2..=3).contains(&root_keys.len()),
        "root has {} keys",
        root_keys.len()
    );
}

#[test]
fn full_range_scan_returns_everything_in_key_order() {
    let dir = tempdir().unwrap();
    let mut tree = BPlusTree::open(dir.path().join("bptree.bin")).unwrap();
    tree.bulk_load(&entries()).unwrap();

    let all = tree.range_search(f32::MIN, f32::MAX).unwrap();
    assert_eq!(all.len(), ENTRY_COUNT);

    // Pointers were assigned in key order, so the scan must return them
    // sorted too.
    let mut sorted = all.clone();
    sorted.sort();
    assert_eq!(all, sorted);
}

#[test]
fn range_scan_touches_few_unique_nodes() {
    let dir = tempdir().unwrap();
    let mut tree = BPlusTree::open(dir.path().join("bptree.bin")).unwrap();
    tree.bulk_load(&entries()).unwrap();

    tree.reset_io_stats();
    let matches = tree.range_search(0.9, 1.0).unwrap();

    let expected = entries()
        .iter()
        .filter(|(k, _)| *k >= 0.9 && *k <= 1.0)
        .count();
    assert_eq!(matches.len(), expected);

    // Unique nodes touched stay within height plus the leaves in range
    // (one extra leaf read decides termination).
    let height = tree.num_levels().unwrap();
    let leaves_in_range = expected / MAX_KEYS + 2;
    assert!(tree.io_stats().unique_pages <= height + leaves_in_range);
}

#[test]
fn point_search_equals_range_of_width_zero() {
    let dir = tempdir().unwrap();
    let mut tree = BPlusTree::open(dir.path().join("bptree.bin")).unwrap();
    tree.bulk_load(&entries()).unwrap();

    let key = 1_000 as f32 / ENTRY_COUNT as f32;
    let by_search = tree.search(key).unwrap();
    let by_range = tree.range_search(key, key).unwrap();
    assert_eq!(by_search, by_range);
    assert_eq!(by_search.len(), 1);
}

#[test]
fn range_delete_then_search_is_empty() {
    let dir = tempdir().unwrap();
    let mut tree = BPlusTree::open(dir.path().join("bptree.bin")).unwrap();
    tree.bulk_load(&entries()).unwrap();

    let expected_removed = entries()
        .iter()
        .filter(|(k, _)| *k >= 0.9 && *k <= 1.0)
        .count();
    let removed = tree.remove_range(0.9, 1.0).unwrap();
    assert_eq!(removed, expected_removed);

    assert!(tree.range_search(0.9, 1.0).unwrap().is_empty());

    let survivors = tree.range_search(f32::MIN, f32::MAX).unwrap();
    assert_eq!(survivors.len(), ENTRY_COUNT - removed);

    // ~24k survivors still need leaves, internals, and a root.
    assert_eq!(tree.num_levels().unwrap(), 3);
}

#[test]
fn range_delete_of_small_survivor_set_collapses_height() {
    let dir = tempdir().unwrap();
    let mut tree = BPlusTree::open(dir.path().join("bptree.bin")).unwrap();

    let data: Vec<_> = (0..1_000)
        .map(|i| {
            (
                i as f32 / 1_000.0,
                RecordPointer::new(i / 92, i % 92),
            )
        })
        .collect();
    tree.bulk_load(&data).unwrap();
    assert_eq!(tree.num_levels().unwrap(), 2);

    // Keep only 60 entries: they fit one leaf, which becomes the root.
    let removed = tree.remove_range(0.06, 1.0).unwrap();
    assert_eq!(removed, 940);
    assert_eq!(tree.num_levels().unwrap(), 1);
    assert_eq!(tree.range_search(0.0, 1.0).unwrap().len(), 60);
}

#[test]
fn bulk_load_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bptree.bin");

    {
        let mut tree = BPlusTree::open(&path).unwrap();
        tree.bulk_load(&entries()).unwrap();
        tree.close().unwrap();
    }

    let tree = BPlusTree::open(&path).unwrap();
    assert_eq!(tree.num_levels().unwrap(), 3);
    assert_eq!(
        tree.range_search(f32::MIN, f32::MAX).unwrap().len(),
        ENTRY_COUNT
    );
}
