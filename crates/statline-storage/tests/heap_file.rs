//! Heap file integration tests: block packing, persistence round trips,
//! and the capacity cap.

use statline_common::{GameRecord, RecordPointer, StatlineError};
use statline_storage::{Block, HeapFile, BLOCK_SIZE, HEAP_HEADER_SIZE, MAX_HEAP_BYTES, RECORDS_PER_BLOCK};
use tempfile::tempdir;

fn record(i: usize) -> GameRecord {
    GameRecord::new(
        &format!("{:02}/01/2024", (i % 28) + 1),
        1_610_612_737 + (i as i32 % 30),
        90 + (i as i32 % 40),
        0.40 + (i % 20) as f32 / 100.0,
        (i % 1000) as f32 / 1000.0,
        0.30 + (i % 10) as f32 / 100.0,
        15 + (i as i32 % 20),
        30 + (i as i32 % 25),
        (i % 2) as i32,
    )
}

#[test]
fn packing_ninety_three_records_spans_two_blocks() {
    let dir = tempdir().unwrap();
    let mut heap = HeapFile::open(dir.path().join("database.bin")).unwrap();

    for i in 0..=RECORDS_PER_BLOCK {
        heap.add_record(&record(i)).unwrap();
    }

    assert_eq!(heap.num_blocks(), 2);
    assert_eq!(heap.num_records(), 93);
    assert_eq!(heap.read_block(0).unwrap().num_records(), 92);
    assert_eq!(heap.read_block(1).unwrap().num_records(), 1);
}

#[test]
fn insertion_order_survives_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("database.bin");
    let total = 2 * RECORDS_PER_BLOCK + 17;

    {
        let mut heap = HeapFile::open(&path).unwrap();
        for i in 0..total {
            heap.add_record(&record(i)).unwrap();
        }
        heap.close().unwrap();
    }

    let heap = HeapFile::open(&path).unwrap();
    assert_eq!(heap.num_blocks(), 3);
    assert_eq!(heap.num_records(), total as i32);

    let scanned = heap.scan_records().unwrap();
    assert_eq!(scanned.len(), total);
    for (i, rec) in scanned.iter().enumerate() {
        assert_eq!(*rec, record(i), "record {} out of order", i);
    }
}

#[test]
fn deleted_slots_read_back_as_sentinels_after_reopen() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("database.bin");

    {
        let mut heap = HeapFile::open(&path).unwrap();
        for i in 0..10 {
            heap.add_record(&record(i)).unwrap();
        }
        heap.delete_record(RecordPointer::new(0, 3)).unwrap();
        heap.delete_record(RecordPointer::new(0, 7)).unwrap();
        heap.close().unwrap();
    }

    let heap = HeapFile::open(&path).unwrap();
    // num_records still counts the deleted slots.
    assert_eq!(heap.num_records(), 10);

    let scanned = heap.scan_records().unwrap();
    assert!(scanned[3].is_empty());
    assert!(scanned[7].is_empty());
    assert_eq!(scanned.iter().filter(|r| r.is_empty()).count(), 2);
}

#[test]
fn delete_of_missing_slot_leaves_state_unchanged() {
    let dir = tempdir().unwrap();
    let mut heap = HeapFile::open(dir.path().join("database.bin")).unwrap();
    heap.add_record(&record(0)).unwrap();

    assert!(heap.delete_record(RecordPointer::new(0, 9)).is_err());
    assert!(heap.delete_record(RecordPointer::new(4, 0)).is_err());
    assert_eq!(heap.num_records(), 1);
    assert!(!heap.get_record(RecordPointer::new(0, 0)).unwrap().is_empty());
}

#[test]
fn capacity_cap_refuses_the_overflowing_insert() {
    let dir = tempdir().unwrap();
    let mut heap = HeapFile::open(dir.path().join("database.bin")).unwrap();

    // Fill one block completely, then append it until the file is one
    // block short of the cap.
    let mut full = Block::new(0);
    for i in 0..RECORDS_PER_BLOCK {
        assert!(full.add_record(&record(i)));
    }

    let max_blocks = ((MAX_HEAP_BYTES - HEAP_HEADER_SIZE) / BLOCK_SIZE as u64) as i32;
    while heap.num_blocks() < max_blocks {
        full.set_block_id(heap.num_blocks());
        heap.add_block(&full).unwrap();
    }

    let blocks_before = heap.num_blocks();
    let err = heap.add_record(&record(0)).unwrap_err();
    assert!(matches!(err, StatlineError::CapacityExceeded { .. }));
    assert_eq!(heap.num_blocks(), blocks_before);
    assert_eq!(heap.num_records(), 0);
}
