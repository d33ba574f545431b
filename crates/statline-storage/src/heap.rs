//! Heap file manager: a block-paged file of fixed-width records.
//!
//! File layout: an 8-byte header `(num_blocks: i32, num_records: i32)`
//! followed by dense 4096-byte blocks at `8 + id * 4096`. There is no
//! buffer pool: every block access is an explicit, counted file operation
//! producing a fresh copy. The header is rewritten only by [`HeapFile::close`]
//! (and best-effort on drop); data pages are written through immediately.

use crate::block::{Block, BLOCK_SIZE};
use parking_lot::Mutex;
use statline_common::{GameRecord, IoSnapshot, IoStats, RecordPointer, Result, StatlineError};
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

/// Size of the heap file header in bytes.
pub const HEAP_HEADER_SIZE: u64 = 8;

/// Hard cap on the heap file size (100 MiB).
pub const MAX_HEAP_BYTES: u64 = 100 * 1024 * 1024;

/// Owner of the block-paged heap file.
///
/// Reads are counted, so the file handle and the counters sit behind
/// mutexes to let `&self` readers record their cost. The engine itself is
/// single-threaded; a second instance must never target the same path.
pub struct HeapFile {
    path: PathBuf,
    file: Mutex<File>,
    num_blocks: i32,
    num_records: i32,
    stats: Mutex<IoStats>,
}

impl HeapFile {
    /// Opens the heap file read-write, creating and initializing it when
    /// absent.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&path)
            .map_err(|source| StatlineError::OpenFailed {
                path: path.clone(),
                source,
            })?;
        let len = file.metadata()?.len();

        let mut heap = Self {
            path,
            file: Mutex::new(file),
            num_blocks: 0,
            num_records: 0,
            stats: Mutex::new(IoStats::new()),
        };

        if len < HEAP_HEADER_SIZE {
            heap.write_header()?;
        } else {
            heap.read_header()?;
        }
        Ok(heap)
    }

    /// Flushes the header and syncs the file. Safe to call more than once.
    pub fn close(&mut self) -> Result<()> {
        self.write_header()?;
        self.file.lock().sync_all()?;
        Ok(())
    }

    /// Returns the heap file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total number of blocks in the file.
    pub fn num_blocks(&self) -> i32 {
        self.num_blocks
    }

    /// Total number of records, as maintained by insertions.
    ///
    /// Deletion overwrites slots with the empty sentinel without
    /// decrementing this count, so after deletes it overstates live rows.
    pub fn num_records(&self) -> i32 {
        self.num_records
    }

    fn write_header(&self) -> Result<()> {
        let mut file = self.file.lock();
        file.seek(SeekFrom::Start(0))?;
        file.write_all(&self.num_blocks.to_le_bytes())?;
        file.write_all(&self.num_records.to_le_bytes())?;
        Ok(())
    }

    fn read_header(&mut self) -> Result<()> {
        let mut buf = [0u8; HEAP_HEADER_SIZE as usize];
        {
            let mut file = self.file.lock();
            file.seek(SeekFrom::Start(0))?;
            file.read_exact(&mut buf)?;
        }
        self.num_blocks = i32::from_le_bytes([buf[0], buf[1], buf[2], buf[3]]);
        self.num_records = i32::from_le_bytes([buf[4], buf[5], buf[6], buf[7]]);
        Ok(())
    }

    fn block_offset(block_id: i32) -> u64 {
        HEAP_HEADER_SIZE + block_id as u64 * BLOCK_SIZE as u64
    }

    /// Writes a block at its fixed offset and counts the I/O.
    pub fn write_block(&self, block_id: i32, block: &Block) -> Result<()> {
        if block_id < 0 {
            return Err(StatlineError::InvalidPointer {
                block_id,
                record_index: -1,
            });
        }

        {
            let mut file = self.file.lock();
            file.seek(SeekFrom::Start(Self::block_offset(block_id)))?;
            file.write_all(block.as_bytes())?;
        }
        self.stats.lock().record(block_id);
        Ok(())
    }

    /// Reads the block at the given id, counting the I/O.
    ///
    /// Every call returns a fresh copy; nothing is cached.
    pub fn read_block(&self, block_id: i32) -> Result<Block> {
        if block_id < 0 || block_id >= self.num_blocks {
            return Err(StatlineError::InvalidPointer {
                block_id,
                record_index: -1,
            });
        }

        let mut buf = [0u8; BLOCK_SIZE];
        {
            let mut file = self.file.lock();
            file.seek(SeekFrom::Start(Self::block_offset(block_id)))?;
            file.read_exact(&mut buf)?;
        }
        self.stats.lock().record(block_id);
        Ok(Block::from_bytes(buf))
    }

    /// Appends a block to the file, assigning it the next dense id.
    pub fn add_block(&mut self, block: &Block) -> Result<i32> {
        let block_id = self.num_blocks;
        self.write_block(block_id, block)?;
        self.num_blocks += 1;
        Ok(block_id)
    }

    /// Inserts a record into the last partially filled block, appending a
    /// fresh block when needed.
    ///
    /// Never scans for holes: O(1) amortized. Refuses with
    /// [`StatlineError::CapacityExceeded`] when a new block would push the
    /// file past [`MAX_HEAP_BYTES`]; nothing changes in that case.
    pub fn add_record(&mut self, record: &GameRecord) -> Result<()> {
        if self.num_blocks > 0 {
            let last_id = self.num_blocks - 1;
            let mut block = self.read_block(last_id)?;
            if !block.is_full() {
                block.add_record(record);
                self.write_block(last_id, &block)?;
                self.num_records += 1;
                return Ok(());
            }
        }

        let current = Self::block_offset(self.num_blocks);
        let requested = current + BLOCK_SIZE as u64;
        if requested > MAX_HEAP_BYTES {
            return Err(StatlineError::CapacityExceeded {
                requested,
                limit: MAX_HEAP_BYTES,
            });
        }

        let mut block = Block::new(self.num_blocks);
        block.add_record(record);
        self.add_block(&block)?;
        self.num_records += 1;
        Ok(())
    }

    /// Reads the record a pointer refers to.
    ///
    /// An out-of-range slot yields the zero record, matching block
    /// semantics; an out-of-range block id is an error.
    pub fn get_record(&self, ptr: RecordPointer) -> Result<GameRecord> {
        let block = self.read_block(ptr.block_id)?;
        Ok(block.get_record(ptr.record_index))
    }

    /// Overwrites the pointed-at slot with the empty sentinel.
    ///
    /// The record count is intentionally left alone: the slot stays
    /// logically present and later scans see the sentinel row.
    pub fn delete_record(&mut self, ptr: RecordPointer) -> Result<()> {
        let mut block = self.read_block(ptr.block_id)?;
        if !block.clear_record(ptr.record_index) {
            return Err(StatlineError::InvalidPointer {
                block_id: ptr.block_id,
                record_index: ptr.record_index,
            });
        }
        self.write_block(ptr.block_id, &block)
    }

    /// Reads every block in order and returns all logically present slots,
    /// sentinel rows included.
    pub fn scan_records(&self) -> Result<Vec<GameRecord>> {
        let mut records = Vec::with_capacity(self.num_records.max(0) as usize);
        for block_id in 0..self.num_blocks {
            let block = self.read_block(block_id)?;
            for index in 0..block.num_records() {
                records.push(block.get_record(index));
            }
        }
        Ok(records)
    }

    /// Copies out the current I/O counters.
    pub fn io_stats(&self) -> IoSnapshot {
        self.stats.lock().snapshot()
    }

    /// Zeroes the I/O counters.
    pub fn reset_io_stats(&self) {
        self.stats.lock().reset();
    }
}

impl Drop for HeapFile {
    fn drop(&mut self) {
        let _ = self.close();
    }
}
