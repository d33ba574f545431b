//! The two comparable query paths over the heap and the index, plus the
//! delete path that drives both.

use statline_common::{GameRecord, IoSnapshot, RecordPointer, Result, StatlineError};
use statline_index::BPlusTree;
use statline_storage::HeapFile;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};
use tracing::warn;

/// Result of an indexed range scan.
#[derive(Debug, Clone)]
pub struct IndexedScanReport {
    /// Pointers returned by the index, in key order.
    pub pointers: Vec<RecordPointer>,
    /// Records whose key actually fell in range when fetched.
    pub matches: usize,
    /// Average key over the matches (0 when none).
    pub avg_key: f32,
    /// Index I/O during the scan.
    pub index_ios: IoSnapshot,
    /// Heap I/O during the scan.
    pub heap_ios: IoSnapshot,
    /// Wall-clock time of the scan.
    pub elapsed: Duration,
}

/// Result of a brute-force heap scan.
#[derive(Debug, Clone)]
pub struct FullScanReport {
    /// Records whose key fell in range.
    pub matches: usize,
    /// Average key over the matches (0 when none).
    pub avg_key: f32,
    /// Blocks read sequentially.
    pub blocks_scanned: usize,
    /// Heap I/O during the scan.
    pub heap_ios: IoSnapshot,
    /// Wall-clock time of the scan.
    pub elapsed: Duration,
}

/// Result of a range deletion across both structures.
#[derive(Debug, Clone, Copy)]
pub struct DeleteReport {
    /// Entries removed from the index.
    pub index_removed: usize,
    /// Slots overwritten on the heap.
    pub heap_deleted: usize,
}

/// Drives the heap and the index together: ingestion, index construction,
/// the two query paths, and range deletion.
pub struct QueryEngine {
    heap: HeapFile,
    index: BPlusTree,
}

impl QueryEngine {
    /// Wraps an open heap and index pair.
    pub fn new(heap: HeapFile, index: BPlusTree) -> Self {
        Self { heap, index }
    }

    /// The underlying heap file.
    pub fn heap(&self) -> &HeapFile {
        &self.heap
    }

    /// The underlying index.
    pub fn index(&self) -> &BPlusTree {
        &self.index
    }

    /// Closes both files, persisting their metadata.
    pub fn close(&mut self) -> Result<()> {
        self.heap.close()?;
        self.index.close()?;
        Ok(())
    }

    /// Stores records into the heap in order.
    ///
    /// A capacity refusal drops that record with a warning and the run
    /// continues; any other failure propagates. Returns how many records
    /// were stored.
    pub fn load_heap(&mut self, records: &[GameRecord]) -> Result<usize> {
        let mut stored = 0usize;
        for record in records {
            match self.heap.add_record(record) {
                Ok(()) => stored += 1,
                Err(StatlineError::CapacityExceeded { requested, limit }) => {
                    warn!(requested, limit, "heap capacity exceeded, record dropped");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(stored)
    }

    /// Bulk-builds the index from the heap: one `(ft_pct, pointer)` entry
    /// per logically present slot. Returns the entry count; an empty heap
    /// leaves the index untouched.
    pub fn build_index(&mut self) -> Result<usize> {
        let mut entries = Vec::with_capacity(self.heap.num_records().max(0) as usize);
        for block_id in 0..self.heap.num_blocks() {
            let block = self.heap.read_block(block_id)?;
            for record_index in 0..block.num_records() {
                let record = block.get_record(record_index);
                entries.push((record.ft_pct, RecordPointer::new(block_id, record_index)));
            }
        }

        if entries.is_empty() {
            return Ok(0);
        }
        self.index.bulk_load(&entries)?;
        Ok(entries.len())
    }

    /// Range query through the index.
    ///
    /// Resets both counter sets, range-searches the index, then fetches
    /// the matches batched by block: each distinct block is read once and
    /// the requested slots extracted. Keys are re-checked against the
    /// range so sentinel slots left by earlier deletions never count.
    pub fn indexed_range_scan(&self, min_key: f32, max_key: f32) -> Result<IndexedScanReport> {
        self.index.reset_io_stats();
        self.heap.reset_io_stats();
        let start = Instant::now();

        let pointers = self.index.range_search(min_key, max_key)?;

        let mut by_block: BTreeMap<i32, Vec<i32>> = BTreeMap::new();
        for ptr in &pointers {
            by_block.entry(ptr.block_id).or_default().push(ptr.record_index);
        }

        let mut sum = 0.0f32;
        let mut matches = 0usize;
        for (block_id, slots) in &by_block {
            let block = self.heap.read_block(*block_id)?;
            for &slot in slots {
                let record = block.get_record(slot);
                if record.ft_pct >= min_key && record.ft_pct <= max_key {
                    sum += record.ft_pct;
                    matches += 1;
                }
            }
        }

        Ok(IndexedScanReport {
            pointers,
            matches,
            avg_key: if matches > 0 { sum / matches as f32 } else { 0.0 },
            index_ios: self.index.io_stats(),
            heap_ios: self.heap.io_stats(),
            elapsed: start.elapsed(),
        })
    }

    /// Range query by linear heap scan, for comparison against the index.
    pub fn full_scan(&self, min_key: f32, max_key: f32) -> Result<FullScanReport> {
        self.heap.reset_io_stats();
        let start = Instant::now();

        let mut sum = 0.0f32;
        let mut matches = 0usize;
        let mut blocks_scanned = 0usize;
        for block_id in 0..self.heap.num_blocks() {
            let block = self.heap.read_block(block_id)?;
            blocks_scanned += 1;
            for record_index in 0..block.num_records() {
                let record = block.get_record(record_index);
                if record.ft_pct >= min_key && record.ft_pct <= max_key {
                    sum += record.ft_pct;
                    matches += 1;
                }
            }
        }

        Ok(FullScanReport {
            matches,
            avg_key: if matches > 0 { sum / matches as f32 } else { 0.0 },
            blocks_scanned,
            heap_ios: self.heap.io_stats(),
            elapsed: start.elapsed(),
        })
    }

    /// Deletes every record whose key falls in the range, from the index
    /// and from the heap.
    ///
    /// The two counts can differ by construction: the index rebuilds from
    /// surviving keys while the heap overwrites exactly the pointed-at
    /// slots.
    pub fn delete_range(&mut self, min_key: f32, max_key: f32) -> Result<DeleteReport> {
        let scan = self.indexed_range_scan(min_key, max_key)?;

        let index_removed = self.index.remove_range(min_key, max_key)?;

        let mut heap_deleted = 0usize;
        for ptr in &scan.pointers {
            match self.heap.delete_record(*ptr) {
                Ok(()) => heap_deleted += 1,
                Err(StatlineError::InvalidPointer { .. }) => {}
                Err(e) => return Err(e),
            }
        }

        Ok(DeleteReport {
            index_removed,
            heap_deleted,
        })
    }
}
