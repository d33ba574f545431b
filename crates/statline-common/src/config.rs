//! Configuration structures for the Statline engine.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Storage configuration for the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the data and index files.
    pub data_dir: PathBuf,
    /// File name of the heap file inside `data_dir`.
    pub heap_file_name: String,
    /// File name of the B+ tree index file inside `data_dir`.
    pub index_file_name: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./output"),
            heap_file_name: "database.bin".to_string(),
            index_file_name: "bptree.bin".to_string(),
        }
    }
}

impl StorageConfig {
    /// Returns the full path of the heap file.
    pub fn heap_path(&self) -> PathBuf {
        self.data_dir.join(&self.heap_file_name)
    }

    /// Returns the full path of the index file.
    pub fn index_path(&self) -> PathBuf {
        self.data_dir.join(&self.index_file_name)
    }
}
