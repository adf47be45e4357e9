//! Persistence: session snapshots and the notebook log.
//!
//! ## Key Types
//!
//! - `KeyValueStore`: string storage boundary (`MemoryStore`, `FileStore`)
//! - `SessionSnapshot`: mode, position, drawn-card ledger, random stream positions
//! - `Notebook` / `NotebookEntry`: visited links, deduplicated by url
//! - `PersistenceGateway`: sole reader/writer of the two storage keys

mod gateway;
mod notebook;
mod snapshot;
mod store;

pub use gateway::{PersistenceError, PersistenceGateway};
pub use notebook::{Notebook, NotebookEntry};
pub use snapshot::{RngSnapshot, SessionSnapshot};
pub use store::{FileStore, KeyValueStore, MemoryStore, StoreError};
