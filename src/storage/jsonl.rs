//! Line-per-record JSON files.
//!
//! Each stored type owns one file under the data directory. A file is read
//! front to back: unreadable lines are logged and skipped, and when an ID
//! appears twice the first record wins.

use std::collections::HashSet;
use std::fs::{self, File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, info, warn};

use super::{StorageConfig, StorageError};
use crate::models::{EntityId, Match, Player};

/// A record type with its own JSONL file.
pub trait Stored: Serialize + DeserializeOwned {
    /// File name under the data directory.
    const FILE_NAME: &'static str;

    fn id(&self) -> &EntityId;
}

impl Stored for Player {
    const FILE_NAME: &'static str = "players.jsonl";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

impl Stored for Match {
    const FILE_NAME: &'static str = "matches.jsonl";

    fn id(&self) -> &EntityId {
        &self.id
    }
}

/// Handle on the JSONL file for `T`.
pub struct JsonlFile<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: Stored> JsonlFile<T> {
    pub fn at(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    /// The file for `T` under the configured data directory.
    pub fn in_dir(config: &StorageConfig) -> Self {
        Self::at(config.file_for::<T>())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every readable record, first occurrence of each ID only.
    pub fn load(&self) -> Result<Vec<T>, StorageError> {
        self.load_where(|_| true)
    }

    /// Readable records for which `keep` returns true.
    pub fn load_where<F>(&self, keep: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let reader = BufReader::new(File::open(&self.path)?);
        let mut seen: HashSet<EntityId> = HashSet::new();
        let mut records = Vec::new();

        for (lineno, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            let record: T = match serde_json::from_str(&line) {
                Ok(record) => record,
                Err(e) => {
                    warn!("Skipping line {} of {:?}: {}", lineno + 1, self.path, e);
                    continue;
                }
            };

            if !seen.insert(record.id().clone()) {
                debug!("Ignoring repeated id {} in {:?}", record.id(), self.path);
                continue;
            }
            if keep(&record) {
                records.push(record);
            }
        }

        debug!("Loaded {} records from {:?}", records.len(), self.path);
        Ok(records)
    }

    pub fn contains(&self, id: &EntityId) -> Result<bool, StorageError> {
        Ok(!self.load_where(|r| r.id() == id)?.is_empty())
    }

    /// Add one record at the end of the file, creating it if needed.
    pub fn append(&self, record: &T) -> Result<(), StorageError> {
        self.create_parent()?;

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut out = BufWriter::new(file);
        writeln!(out, "{}", serde_json::to_string(record)?)?;
        out.flush()?;

        debug!("Appended {} to {:?}", record.id(), self.path);
        Ok(())
    }

    /// Rewrite the file to hold exactly `records`.
    ///
    /// The new contents go to a sibling `.tmp` file that is then renamed over
    /// the original, so readers see either the old file or the new one.
    pub fn replace(&self, records: &[T]) -> Result<usize, StorageError> {
        self.create_parent()?;

        let tmp = self.path.with_extension("jsonl.tmp");
        {
            let mut out = BufWriter::new(File::create(&tmp)?);
            for record in records {
                writeln!(out, "{}", serde_json::to_string(record)?)?;
            }
            out.flush()?;
        }
        fs::rename(&tmp, &self.path)?;

        info!("Rewrote {:?} with {} records", self.path, records.len());
        Ok(records.len())
    }

    fn create_parent(&self) -> Result<(), StorageError> {
        match self.path.parent() {
            Some(dir) => Ok(fs::create_dir_all(dir)?),
            None => Ok(()),
        }
    }
}
