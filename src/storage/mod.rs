//! Filesystem persistence for tournament records.
//!
//! Handles reading and writing the tournament's flat tables:
//! - Registered teams and their groups
//! - Matches (one row per fixture)
//! - Player statistic rows
//!
//! Everything is JSONL on disk. A missing file reads as an empty table.

mod convert;
mod jsonl;
mod store;

pub use convert::*;
pub use jsonl::*;
pub use store::*;

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Malformed row: {0}")]
    MalformedRow(String),
}

/// Configuration for storage paths.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    pub fn tournament_dir(&self) -> PathBuf {
        self.data_dir.join("tournament")
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
