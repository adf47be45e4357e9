//! Single reader/writer of the persisted game keys.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::core::StorageKeys;

use super::notebook::{Notebook, NotebookEntry};
use super::snapshot::SessionSnapshot;
use super::store::{KeyValueStore, StoreError};

/// Errors that can occur while persisting or restoring.
#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    /// The store rejected a write.
    #[error("failed to write '{key}': {source}")]
    Write {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to read '{key}': {source}")]
    Read {
        key: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to encode '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("stored '{key}' is corrupt: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

impl PersistenceError {
    /// Whether this is a rejected write.
    #[must_use]
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write { .. } | Self::Encode { .. })
    }
}

pub type Result<T> = std::result::Result<T, PersistenceError>;

/// Serializes session snapshots and the notebook to a `KeyValueStore`.
///
/// Writes are serialized by an internal lock, so a snapshot save and a
/// notebook append never interleave and last-write-wins holds per key.
pub struct PersistenceGateway {
    store: Arc<dyn KeyValueStore>,
    keys: StorageKeys,
    write_lock: Mutex<()>,
}

impl PersistenceGateway {
    /// Create a gateway over `store` using `keys`.
    pub fn new(store: Arc<dyn KeyValueStore>, keys: StorageKeys) -> Self {
        Self {
            store,
            keys,
            write_lock: Mutex::new(()),
        }
    }

    /// Storage keys in use.
    #[must_use]
    pub fn keys(&self) -> &StorageKeys {
        &self.keys
    }

    // ── Session snapshot ──

    /// Write the snapshot, replacing the previous one.
    pub fn save_snapshot(&self, snapshot: &SessionSnapshot) -> Result<()> {
        let key = &self.keys.progress_key;
        let blob = encode(key, snapshot)?;
        let _guard = self.write_lock.lock();
        self.write(key, &blob)?;
        debug!(key = %key, position = snapshot.position, "session snapshot saved");
        Ok(())
    }

    /// Read the snapshot, or `None` on a fresh install.
    pub fn load_snapshot(&self) -> Result<Option<SessionSnapshot>> {
        self.read(&self.keys.progress_key)
    }

    /// Delete the snapshot.
    pub fn clear_snapshot(&self) -> Result<()> {
        let key = &self.keys.progress_key;
        let _guard = self.write_lock.lock();
        self.store
            .remove(key)
            .map_err(|source| PersistenceError::Write {
                key: key.clone(),
                source,
            })
    }

    // ── Notebook ──

    /// Read the notebook; empty when nothing was recorded yet.
    pub fn load_notebook(&self) -> Result<Notebook> {
        Ok(self.read(&self.keys.notebook_key)?.unwrap_or_default())
    }

    /// Append `entry` unless its url is already recorded.
    ///
    /// Returns `true` if the notebook grew.
    pub fn append_notebook(&self, entry: NotebookEntry) -> Result<bool> {
        let key = &self.keys.notebook_key;
        let _guard = self.write_lock.lock();
        let mut notebook: Notebook = self.read(key)?.unwrap_or_default();
        if !notebook.append_if_absent(entry) {
            return Ok(false);
        }
        let blob = encode(key, &notebook)?;
        self.write(key, &blob)?;
        debug!(key = %key, entries = notebook.len(), "notebook entry appended");
        Ok(true)
    }

    fn write(&self, key: &str, blob: &str) -> Result<()> {
        self.store.save(key, blob).map_err(|source| {
            warn!(key, error = %source, "store rejected write");
            PersistenceError::Write {
                key: key.to_string(),
                source,
            }
        })
    }

    fn read<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(blob) = self
            .store
            .load(key)
            .map_err(|source| PersistenceError::Read {
                key: key.to_string(),
                source,
            })?
        else {
            return Ok(None);
        };
        serde_json::from_str(&blob)
            .map(Some)
            .map_err(|source| PersistenceError::Decode {
                key: key.to_string(),
                source,
            })
    }
}

fn encode<T: serde::Serialize>(key: &str, value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|source| PersistenceError::Encode {
        key: key.to_string(),
        source,
    })
}
