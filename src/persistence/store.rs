//! Key-value string stores.
//!
//! `FileStore` keeps one file per key under a root directory:
//!
//! ```text
//! <root>/
//!   gameProgress.json   # session snapshot
//!   notebook.json       # notebook log
//! ```
//!
//! Writes go through a temporary file in the same directory and are
//! renamed into place, so a reader never observes a half-written blob.
//!
//! Key names map to file names one-to-one: ASCII letters, digits and `-`
//! are kept and every other byte becomes `_xx` (lowercase hex), so
//! `game.progress` is stored as `game_2eprogress.json`.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::fs;

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use tempfile::NamedTempFile;

/// Errors raised by a store backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("store backend error: {0}")]
    Backend(String),
}

impl From<tempfile::PersistError> for StoreError {
    fn from(err: tempfile::PersistError) -> Self {
        Self::Io(err.error)
    }
}

/// Durable string storage keyed by name.
///
/// Every method takes `&self`; implementations handle their own interior
/// mutability so a store can be shared behind an `Arc`.
pub trait KeyValueStore: Send + Sync {
    /// Write `blob` under `key`, replacing any previous value.
    fn save(&self, key: &str, blob: &str) -> Result<(), StoreError>;

    /// Read the value under `key`, or `None` if it was never written.
    fn load(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Delete the value under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store, for tests and frontends without durable storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<FxHashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Check if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn save(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        self.entries.write().insert(key.to_string(), blob.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().remove(key);
        Ok(())
    }
}

/// Directory-backed store with atomic replacement of each key's file.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Create a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    /// Directory holding the key files.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", encode_key(key)))
    }
}

impl KeyValueStore for FileStore {
    fn save(&self, key: &str, blob: &str) -> Result<(), StoreError> {
        let mut file = NamedTempFile::new_in(&self.root)?;
        file.write_all(blob.as_bytes())?;
        file.as_file().sync_all()?;
        file.persist(self.path_for(key))?;
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(blob) => Ok(Some(blob)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// File stem for `key`. `_` only ever starts an escape, so distinct keys
/// never share a file.
fn encode_key(key: &str) -> String {
    let mut stem = String::with_capacity(key.len());
    for byte in key.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' {
            stem.push(char::from(byte));
        } else {
            let _ = write!(stem, "_{byte:02x}");
        }
    }
    if stem.is_empty() {
        stem.push('_');
    }
    stem
}
