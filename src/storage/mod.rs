//! Filesystem storage.
//!
//! Players and matches live in JSONL files under the data directory:
//! - `players.jsonl`: one [`Player`](crate::models::Player) per line
//! - `matches.jsonl`: one [`Match`](crate::models::Match) per line
//!
//! Callers go through the [`Repository`] trait so the HTTP layer and CLI
//! never touch files directly.

mod jsonl;
mod repository;

pub use jsonl::*;
pub use repository::*;

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate entity: {0}")]
    Duplicate(String),
}

/// Where the data files live.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub fn new(data_dir: PathBuf) -> Self {
        Self { data_dir }
    }

    /// Path of the file holding records of type `T`.
    pub fn file_for<T: Stored>(&self) -> PathBuf {
        self.data_dir.join(T::FILE_NAME)
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::new(PathBuf::from("./data"))
    }
}
