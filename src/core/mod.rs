//! Core types: transport modes, RNG, configuration, errors.
//!
//! Everything here is shared by the card, deck, dice, board and session
//! layers. Frontends configure the game via `GameConfig` rather than
//! modifying the core.

pub mod config;
pub mod error;
pub mod mode;
pub mod rng;

pub use config::{ConfigError, GameConfig, PathLengths, StorageKeys};
pub use error::{GameError, Result};
pub use mode::{CardTransport, TransportMode};
pub use rng::{GameRng, GameRngState};
