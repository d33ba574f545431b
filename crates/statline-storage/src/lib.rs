//! Block-paged heap storage for the Statline engine.
//!
//! This crate provides:
//! - `Block`: a 4096-byte page of fixed-width record slots
//! - `HeapFile`: the append-only block-paged heap file with its 100 MiB
//!   cap, header persistence at close, and counted I/O

mod block;
mod heap;

pub use block::{Block, BLOCK_HEADER_SIZE, BLOCK_SIZE, RECORDS_PER_BLOCK};
pub use heap::{HeapFile, HEAP_HEADER_SIZE, MAX_HEAP_BYTES};
