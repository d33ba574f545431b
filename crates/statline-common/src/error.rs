//! Error types for the Statline engine.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using StatlineError.
pub type Result<T> = std::result::Result<T, StatlineError>;

/// Errors that can occur in Statline operations.
#[derive(Debug, Error)]
pub enum StatlineError {
    /// Underlying file I/O failure (seek, read, write, flush).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A data or index file could not be opened read-write.
    #[error("cannot open {}: {source}", .path.display())]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The heap file would grow past its size cap.
    #[error("heap capacity exceeded: {requested} bytes would pass the {limit} byte limit")]
    CapacityExceeded { requested: u64, limit: u64 },

    /// A block id or node id outside the file, or a slot outside a block.
    #[error("invalid pointer: block {block_id}, record {record_index}")]
    InvalidPointer { block_id: i32, record_index: i32 },

    /// Bulk load was handed an empty entry set.
    #[error("bulk load requires at least one entry")]
    EmptyInput,

    /// The index file contradicts its own structure.
    #[error("B+ tree corrupted: {0}")]
    TreeCorrupted(String),
}
