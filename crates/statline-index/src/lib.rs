//! Persistent B+ tree index for the Statline engine.
//!
//! This crate provides:
//! - `IndexNode`: the fixed 828-byte node page, leaf or internal
//! - `BPlusTree`: the persistent tree with bulk load, split-on-overflow
//!   insert, point and range search, point and range delete, diagnostics,
//!   and counted I/O

mod node;
mod tree;

pub use node::{IndexNode, MAX_KEYS, NODE_SIZE};
pub use tree::{BPlusTree, INDEX_HEADER_SIZE};
