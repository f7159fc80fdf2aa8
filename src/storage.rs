//! Vehicle storage: persistence backend and the durable vehicle collection.
//!
//! This module provides:
//! - `StorageBackend`: the key-value persistence collaborator (get/set over
//!   opaque strings), injected into the store so tests can swap in a double
//! - `FileBackend`: production backend, one JSON file per key under a data directory
//! - `MemoryBackend`: in-memory test double
//! - `VehicleStore`: owns (de)serialization of the full vehicle collection
//!   and the read-modify-write cycle
//!
//! # Persistence Layout
//!
//! The entire collection is a single JSON array serialized under the fixed
//! key `valet-parking-vehicles`. There is no versioning field; schema
//! evolution is not supported. Every mutation reads the full collection,
//! edits or appends one record, and rewrites the whole blob.
//!
//! # Concurrency
//!
//! An internal mutex serializes read-modify-write cycles within this
//! process. Two application instances writing the same data directory race
//! last-writer-wins; the deployment assumption is exactly one instance.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

use crate::models::vehicle::Vehicle;

/// Fixed key under which the vehicle collection is persisted.
pub const STORAGE_KEY: &str = "valet-parking-vehicles";

/// Errors from the persistence layer.
///
/// Corrupt persisted data is a surfaced fatal read error, never a silent
/// reset to the empty state.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Backend I/O failed (e.g., data directory unwritable, disk full).
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// Persisted blob exists but is not a valid JSON vehicle collection.
    #[error("persisted vehicle data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    /// The storage lock was poisoned by a panic in another thread.
    #[error("storage lock poisoned")]
    LockPoisoned,
}

/// Key-value persistence collaborator.
///
/// Mirrors the minimal contract the store needs: `get` returns the stored
/// string for a key (or `None` if nothing was ever persisted — absence is
/// the empty state, not an error), `set` overwrites it.
pub trait StorageBackend: Send {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// File-backed storage: each key is a `<key>.json` file under a data directory.
pub struct FileBackend {
    data_dir: PathBuf,
}

impl FileBackend {
    /// Create a file backend rooted at `data_dir`, creating the directory
    /// if it does not exist yet.
    pub fn new(data_dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        Ok(Self { data_dir })
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.data_dir.join(format!("{key}.json"))
    }
}

impl StorageBackend for FileBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(data) => Ok(Some(data)),
            // Missing file means nothing was persisted yet
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        fs::write(self.path_for(key), value)?;
        Ok(())
    }
}

/// In-memory storage double for tests.
#[derive(Default)]
pub struct MemoryBackend {
    entries: HashMap<String, String>,
}

impl StorageBackend for MemoryBackend {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// The durable vehicle collection.
///
/// Wraps a `StorageBackend` and owns the serialize/deserialize cycle for the
/// whole collection. All reads re-parse the persisted blob; there is no
/// in-memory cache that could drift from the persisted state.
pub struct VehicleStore {
    backend: Mutex<Box<dyn StorageBackend>>,
}

impl VehicleStore {
    pub fn new(backend: impl StorageBackend + 'static) -> Self {
        Self {
            backend: Mutex::new(Box::new(backend)),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Box<dyn StorageBackend>>, StorageError> {
        self.backend.lock().map_err(|_| StorageError::LockPoisoned)
    }

    fn parse(data: Option<String>) -> Result<Vec<Vehicle>, StorageError> {
        match data {
            Some(data) => Ok(serde_json::from_str(&data)?),
            None => Ok(Vec::new()),
        }
    }

    /// Load the full collection, in insertion order.
    ///
    /// A missing persisted entry is the empty state, never an error.
    ///
    /// # Errors
    ///
    /// - `Io`: the backend could not be read
    /// - `Corrupt`: the persisted blob is not a valid JSON vehicle collection
    pub fn load(&self) -> Result<Vec<Vehicle>, StorageError> {
        let backend = self.lock()?;
        Self::parse(backend.get(STORAGE_KEY)?)
    }

    /// Begin a read-modify-write cycle.
    ///
    /// The returned transaction holds the storage lock and the freshly
    /// loaded collection. Edit `vehicles` in place, then `commit` to rewrite
    /// the full blob. Dropping the transaction without committing discards
    /// the edits and leaves persisted state untouched.
    pub fn begin(&self) -> Result<StoreTx<'_>, StorageError> {
        let backend = self.lock()?;
        let vehicles = Self::parse(backend.get(STORAGE_KEY)?)?;
        Ok(StoreTx { backend, vehicles })
    }
}

/// An in-flight read-modify-write cycle against the vehicle collection.
///
/// Holds the storage lock for its whole lifetime, so no other cycle in this
/// process can interleave between the read and the write.
pub struct StoreTx<'a> {
    backend: MutexGuard<'a, Box<dyn StorageBackend>>,
    pub vehicles: Vec<Vehicle>,
}

impl StoreTx<'_> {
    /// Persist the edited collection, rewriting the full blob.
    pub fn commit(mut self) -> Result<(), StorageError> {
        let data = serde_json::to_string(&self.vehicles)?;
        self.backend.set(STORAGE_KEY, &data)
    }
}
