//! Query and ingestion layer for the Statline engine.
//!
//! This crate provides:
//! - the tab-separated game-data ingester
//! - `QueryEngine`: the indexed range scan, the brute-force heap scan, and
//!   the delete path driving the heap and the index together
//! - the report renderer for the textual result files

pub mod ingest;
pub mod query;
pub mod report;

pub use query::{DeleteReport, FullScanReport, IndexedScanReport, QueryEngine};
