//! Statline common types, errors, and utilities.
//!
//! This crate provides shared definitions used across all Statline
//! components: the fixed-width record and pointer types, the error enum,
//! storage configuration, and the I/O accounting counters.

pub mod config;
pub mod error;
pub mod io;
pub mod record;

pub use config::StorageConfig;
pub use error::{Result, StatlineError};
pub use io::{IoSnapshot, IoStats};
pub use record::{GameRecord, RecordPointer, RECORD_SIZE};
