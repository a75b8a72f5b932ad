//! In-memory record store for people, coverage assignments and medical profiles.
//!
//! Every successful mutation is followed by a snapshot write through the configured
//! [`Persistence`]. The in-memory change is applied first, so a failed write leaves memory
//! ahead of disk; the error is still returned to the caller.

mod coverage;
mod medical;
mod people;
mod persistence;

pub use persistence::*;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::models::{CoverageAssignment, MedicalProfile, Person};

/// Store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("failed to read data file {path}: {source}", path = path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write data file {path}: {source}", path = path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// The three collections, in data document layout.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Snapshot {
    #[serde(default)]
    pub persons: Vec<Person>,
    #[serde(default)]
    pub firestations: Vec<CoverageAssignment>,
    #[serde(default)]
    pub medicalrecords: Vec<MedicalProfile>,
}

/// Record store owning all three collections.
pub struct RecordStore {
    data: Snapshot,
    persistence: Box<dyn Persistence>,
}

impl RecordStore {
    /// Create a store over existing records.
    pub fn new(data: Snapshot, persistence: Box<dyn Persistence>) -> Self {
        Self { data, persistence }
    }

    /// Populate a store from its persistence backend.
    pub fn load(persistence: Box<dyn Persistence>) -> StoreResult<Self> {
        let store = Self::new(persistence.load()?, persistence);
        info!(
            persons = store.person_count(),
            firestations = store.coverage_count(),
            medicalrecords = store.profile_count(),
            "Data loaded"
        );
        Ok(store)
    }

    /// Open the JSON data file at path. The file must exist.
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        Self::load(Box::new(JsonFilePersistence::new(path.as_ref())))
    }

    /// Create an empty store that keeps snapshots in memory (for testing).
    pub fn open_in_memory() -> Self {
        Self::new(Snapshot::default(), Box::new(MemoryPersistence::default()))
    }

    /// Current contents.
    pub fn snapshot(&self) -> &Snapshot {
        &self.data
    }

    pub fn person_count(&self) -> usize {
        self.data.persons.len()
    }

    pub fn coverage_count(&self) -> usize {
        self.data.firestations.len()
    }

    pub fn profile_count(&self) -> usize {
        self.data.medicalrecords.len()
    }

    /// Write the current snapshot.
    fn persist(&self) -> StoreResult<()> {
        self.persistence.save(&self.data)
    }
}
