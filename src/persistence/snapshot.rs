//! Persisted journey state.
//!
//! The JSON shape is `{transportMode, position, drawnCards, rng}`. Every
//! field is optional on read; `rng` is only written by sessions.

use serde::{Deserialize, Serialize};

use crate::board::BoardState;
use crate::core::{GameRngState, TransportMode};
use crate::deck::DeckLedger;

/// Positions of the session's dice and deck streams at save time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RngSnapshot {
    pub dice: GameRngState,
    pub deck: GameRngState,
}

/// Durable copy of an in-progress journey.
///
/// Written after every state-changing operation and read once at
/// startup.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    #[serde(default)]
    pub transport_mode: Option<TransportMode>,
    #[serde(default)]
    pub position: u32,
    #[serde(default, rename = "drawnCards")]
    pub ledger: DeckLedger,
    /// Random streams to resume; `None` keeps the session's own seeding.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rng: Option<RngSnapshot>,
}

impl SessionSnapshot {
    /// Capture the board and ledger.
    #[must_use]
    pub fn new(board: BoardState, ledger: DeckLedger) -> Self {
        Self {
            transport_mode: board.mode,
            position: board.position,
            ledger,
            rng: None,
        }
    }

    /// Attach the random stream positions.
    #[must_use]
    pub fn with_rng(mut self, rng: RngSnapshot) -> Self {
        self.rng = Some(rng);
        self
    }

    /// Board half of the snapshot.
    #[must_use]
    pub fn board(&self) -> BoardState {
        BoardState {
            mode: self.transport_mode,
            position: self.position,
        }
    }
}
