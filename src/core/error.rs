//! Gameplay errors.
//!
//! Persistence failures are reported separately, see
//! `persistence::PersistenceError`.

use crate::cards::{CardId, CatalogError};

use super::mode::TransportMode;

/// Errors returned by board and session operations.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// No card exists for this mode even after a full reshuffle.
    #[error("no cards exist for the {mode} path")]
    DeckExhausted { mode: TransportMode },

    /// The operation needs a transport mode and none is selected.
    #[error("no transport mode selected; roll at the crossroads first")]
    NoTransportMode,

    /// The player is at the polling station and has not acknowledged the win.
    #[error("journey already finished")]
    JourneyFinished,

    /// A multi-outcome card was resolved without a die roll.
    #[error("card {card} has several outcomes and needs a die roll")]
    RollRequired { card: CardId },

    /// A raw action code outside the supported set.
    #[error("invalid action code '{0}'")]
    InvalidActionCode(String),

    /// The card provider failed or returned malformed content.
    #[error("card catalog error: {0}")]
    Catalog(#[from] CatalogError),
}

pub type Result<T> = std::result::Result<T, GameError>;
