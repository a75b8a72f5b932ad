//! Snapshot persistence backends.

use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use tracing::debug;

use super::{Snapshot, StoreError, StoreResult};

/// Reads the snapshot once at startup and writes it after every mutation.
pub trait Persistence: Send {
    fn load(&self) -> StoreResult<Snapshot>;

    fn save(&self, snapshot: &Snapshot) -> StoreResult<()>;
}

/// Pretty-printed JSON document on disk.
#[derive(Debug, Clone)]
pub struct JsonFilePersistence {
    path: PathBuf,
}

impl JsonFilePersistence {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }
}

impl Persistence for JsonFilePersistence {
    fn load(&self) -> StoreResult<Snapshot> {
        debug!(path = %self.path.display(), "Reading data file");
        let content = fs::read_to_string(&self.path).map_err(|source| StoreError::Read {
            path: self.path.clone(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    fn save(&self, snapshot: &Snapshot) -> StoreResult<()> {
        let content = serde_json::to_string_pretty(snapshot)?;
        fs::write(&self.path, content).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), "Data file written");
        Ok(())
    }
}

/// In-memory backend. Clones share the same saved history.
#[derive(Debug, Clone, Default)]
pub struct MemoryPersistence {
    initial: Snapshot,
    saved: Arc<Mutex<Vec<Snapshot>>>,
}

impl MemoryPersistence {
    /// Backend whose `load` returns the given snapshot.
    pub fn with_snapshot(initial: Snapshot) -> Self {
        Self {
            initial,
            saved: Arc::default(),
        }
    }

    /// Number of snapshots written so far.
    pub fn save_count(&self) -> usize {
        self.saved.lock().map(|saved| saved.len()).unwrap_or_default()
    }

    /// Most recently written snapshot.
    pub fn last_saved(&self) -> Option<Snapshot> {
        self.saved
            .lock()
            .ok()
            .and_then(|saved| saved.last().cloned())
    }
}

impl Persistence for MemoryPersistence {
    fn load(&self) -> StoreResult<Snapshot> {
        Ok(self.initial.clone())
    }

    fn save(&self, snapshot: &Snapshot) -> StoreResult<()> {
        if let Ok(mut saved) = self.saved.lock() {
            saved.push(snapshot.clone());
        }
        Ok(())
    }
}
