//! JSON snapshot persistence for criminal records.
//!
//! The whole collection lives in memory and is serialised as one document,
//! rewritten on every mutation; startup parses the file in full and resumes
//! the id counter past the largest stored id. A single mutex serialises
//! mutation plus persistence, so concurrent writers cannot interleave
//! snapshot writes or hand out duplicate ids. The guard is never held across
//! an await point — the store is synchronous by construction.

use std::io;
use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use cap_std::ambient_authority;
use cap_std::fs::Dir;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::record::{CriminalRecord, DangerLevel, RecordDraft, RecordStatus, RecordSummary};

use super::atomic_io;

/// Errors raised by the snapshot store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The snapshot path does not name a file.
    #[error("data file path '{path}' has no file name")]
    InvalidPath {
        /// The offending path.
        path: String,
    },

    /// The snapshot file could not be read or written.
    #[error("snapshot I/O failure at '{path}': {message}")]
    Io {
        /// Path of the file or directory involved.
        path: String,
        /// Description of the I/O error.
        message: String,
    },

    /// The snapshot JSON is malformed.
    #[error("invalid snapshot JSON: {message}")]
    Parse {
        /// Description of the parse error.
        message: String,
    },

    /// The in-memory collection could not be serialised.
    #[error("failed to encode snapshot: {message}")]
    Encode {
        /// Description of the encoding error.
        message: String,
    },
}

/// Aggregate tallies reported by the statistics endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreStats {
    pub total: usize,
    pub wanted: usize,
    pub arrested: usize,
    pub high_risk: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotDocument {
    #[serde(default)]
    criminals: Vec<CriminalRecord>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotWriter<'a> {
    criminals: &'a [CriminalRecord],
    last_updated: DateTime<Utc>,
}

#[derive(Debug)]
struct StoreInner {
    records: Vec<CriminalRecord>,
    next_id: u64,
}

/// File-backed record store with a single-writer mutation discipline.
#[derive(Debug)]
pub struct SnapshotRecordStore {
    dir: Dir,
    file_name: String,
    inner: Mutex<StoreInner>,
}

impl SnapshotRecordStore {
    /// Open a store backed by `data_file`, loading any existing snapshot.
    ///
    /// A missing file yields an empty store; a corrupt one is an error so
    /// startup never silently discards data.
    pub fn open(data_file: impl AsRef<Path>) -> Result<Self, StoreError> {
        let data_file = data_file.as_ref();
        let file_name = data_file
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| StoreError::InvalidPath {
                path: data_file.display().to_string(),
            })?;
        let parent = match data_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|err| StoreError::Io {
            path: parent.display().to_string(),
            message: err.to_string(),
        })?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(|err| {
            StoreError::Io {
                path: parent.display().to_string(),
                message: err.to_string(),
            }
        })?;

        let records = match dir.read_to_string(&file_name) {
            Ok(contents) => {
                let document: SnapshotDocument =
                    serde_json::from_str(&contents).map_err(|err| StoreError::Parse {
                        message: err.to_string(),
                    })?;
                document.criminals
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => Vec::new(),
            Err(err) => {
                return Err(StoreError::Io {
                    path: file_name,
                    message: err.to_string(),
                });
            }
        };
        let next_id = records.iter().map(|record| record.id).max().map_or(1, |max| max + 1);

        Ok(Self {
            dir,
            file_name,
            inner: Mutex::new(StoreInner { records, next_id }),
        })
    }

    /// Append a record: assign the next id, stamp derived fields, persist.
    ///
    /// On a persistence failure the in-memory append is rolled back and the
    /// id is not consumed, so the snapshot and memory never diverge.
    pub fn add(&self, draft: RecordDraft) -> Result<CriminalRecord, StoreError> {
        let mut inner = self.lock();
        let id = inner.next_id;
        let record = draft.into_record(id, Utc::now());
        inner.records.push(record.clone());
        match self.persist(&inner.records) {
            Ok(()) => {
                inner.next_id += 1;
                Ok(record)
            }
            Err(err) => {
                inner.records.pop();
                Err(err)
            }
        }
    }

    /// Fetch a record by id.
    pub fn get(&self, id: u64) -> Option<CriminalRecord> {
        self.lock().records.iter().find(|record| record.id == id).cloned()
    }

    /// Summaries of every record in insertion order.
    pub fn list(&self) -> Vec<RecordSummary> {
        self.lock().records.iter().map(RecordSummary::from).collect()
    }

    /// The first `limit` records in insertion order.
    pub fn head(&self, limit: usize) -> Vec<CriminalRecord> {
        self.lock().records.iter().take(limit).cloned().collect()
    }

    /// Remove a record by id, persisting the shrunk collection.
    ///
    /// Returns `false` when no record carries the id. On a persistence
    /// failure the record is reinstated at its original position.
    pub fn delete(&self, id: u64) -> Result<bool, StoreError> {
        let mut inner = self.lock();
        let Some(index) = inner.records.iter().position(|record| record.id == id) else {
            return Ok(false);
        };
        let removed = inner.records.remove(index);
        if let Err(err) = self.persist(&inner.records) {
            inner.records.insert(index, removed);
            return Err(err);
        }
        Ok(true)
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.lock().records.len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.lock().records.is_empty()
    }

    /// Aggregate tallies over the current collection.
    pub fn stats(&self) -> StoreStats {
        let inner = self.lock();
        StoreStats {
            total: inner.records.len(),
            wanted: inner
                .records
                .iter()
                .filter(|r| r.status == RecordStatus::Wanted)
                .count(),
            arrested: inner
                .records
                .iter()
                .filter(|r| r.status == RecordStatus::Arrested)
                .count(),
            high_risk: inner
                .records
                .iter()
                .filter(|r| r.danger_level == DangerLevel::High)
                .count(),
        }
    }

    fn lock(&self) -> MutexGuard<'_, StoreInner> {
        // A poisoned mutex only means another writer panicked mid-mutation;
        // the rollback discipline keeps the data consistent, so recover.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn persist(&self, records: &[CriminalRecord]) -> Result<(), StoreError> {
        let document = SnapshotWriter {
            criminals: records,
            last_updated: Utc::now(),
        };
        let contents =
            serde_json::to_string_pretty(&document).map_err(|err| StoreError::Encode {
                message: err.to_string(),
            })?;
        atomic_io::write_atomic(&self.dir, &self.file_name, &contents).map_err(|err| {
            StoreError::Io {
                path: self.file_name.clone(),
                message: err.to_string(),
            }
        })
    }
}
