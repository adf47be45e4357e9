//! # polling-path
//!
//! Game engine for a civic-education board game: the player rolls a die
//! at a crossroads to pick a way of getting to the polling station (bus,
//! carpool or bicycle), then draws scenario cards that move them along
//! that path, send them back, or link out to learning material.
//!
//! ## Design Principles
//!
//! 1. **Content-Driven**: Cards, outcomes and links come from a catalog
//!    behind the `CardProvider` trait. Nothing about a scenario is
//!    hardcoded.
//!
//! 2. **Always Resumable**: Every state change is written to a
//!    `KeyValueStore`. A failed write never aborts the game.
//!
//! 3. **Deterministic When Seeded**: Dice and deck draws come from named
//!    ChaCha8 streams derived from one seed.
//!
//! ## Modules
//!
//! - `core`: Transport modes, configuration, errors, RNG
//! - `cards`: Card definitions, wire records, catalog and provider
//! - `dice`: Die faces and roll resolution
//! - `deck`: Drawn-card ledger (without-replacement draws)
//! - `board`: Position state machine
//! - `persistence`: Snapshot and notebook storage
//! - `session`: Player-facing orchestration

pub mod board;
pub mod cards;
pub mod core;
pub mod deck;
pub mod dice;
pub mod persistence;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    CardTransport, ConfigError, GameConfig, GameError, GameRng, PathLengths, Result, StorageKeys,
    TransportMode,
};

pub use crate::cards::{
    Card, CardAction, CardCatalog, CardId, CardProvider, CatalogError, Outcome, RollSet, Steps,
};

pub use crate::dice::{Dice, DieRoll};

pub use crate::deck::DeckLedger;

pub use crate::board::{BoardEngine, BoardPhase, BoardState, StepOutcome};

pub use crate::persistence::{
    FileStore, KeyValueStore, MemoryStore, Notebook, NotebookEntry, PersistenceError,
    PersistenceGateway, SessionSnapshot,
};

pub use crate::session::{
    ActionOutcome, Attempt, CrossroadsRoll, DrawnCard, GameSession, SharedSession,
};
