//! Board position state machine.
//!
//! | From          | Event                         | To            |
//! |---------------|-------------------------------|---------------|
//! | any           | `select_mode`                 | AtCrossroads  |
//! | AtCrossroads  | forward step                  | InTransit     |
//! | InTransit     | step reaching the path length | Finished      |
//! | InTransit     | backward step landing on 0    | AtCrossroads  |
//! | any           | `apply_crossroads`            | AtCrossroads  |
//! | Finished      | `acknowledge_win`             | AtCrossroads  |
//!
//! Movement is clamped to `[0, path length]`: overshooting the finish is a
//! win, undershooting stops at the start. A backward step that lands on 0
//! from a positive position is a return to the crossroads and unsets the
//! mode; a backward step taken while already on 0 is absorbed.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::core::{GameError, PathLengths, Result, TransportMode};

/// Board position of the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardState {
    /// Current path. `None` at the crossroads before a roll.
    pub mode: Option<TransportMode>,
    /// Tiles travelled along the path.
    pub position: u32,
}

/// Where on the board the player stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardPhase {
    /// No mode yet, or at tile 0 of a freshly chosen path.
    AtCrossroads,
    /// Somewhere between the start and the polling station.
    InTransit,
    /// At the polling station.
    Finished,
}

/// Result of a single step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    /// Position before the step.
    pub from: u32,
    /// Position after clamping.
    pub to: u32,
    /// Phase after the step.
    pub phase: BoardPhase,
    /// The step reached the polling station.
    pub won: bool,
    /// The step sent the player back to the crossroads.
    pub returned_to_crossroads: bool,
}

/// Finite-state machine over `BoardState`.
#[derive(Clone, Debug)]
pub struct BoardEngine {
    state: BoardState,
    path_lengths: PathLengths,
    allow_play_past_finish: bool,
}

impl BoardEngine {
    /// Create an engine at the crossroads.
    #[must_use]
    pub fn new(path_lengths: PathLengths) -> Self {
        Self {
            state: BoardState::default(),
            path_lengths,
            allow_play_past_finish: false,
        }
    }

    /// Keep applying steps after the finish line.
    #[must_use]
    pub fn with_play_past_finish(mut self, allow: bool) -> Self {
        self.allow_play_past_finish = allow;
        self
    }

    /// Current board state.
    #[must_use]
    pub fn state(&self) -> BoardState {
        self.state
    }

    /// Current transport mode.
    #[must_use]
    pub fn mode(&self) -> Option<TransportMode> {
        self.state.mode
    }

    /// Current position.
    #[must_use]
    pub fn position(&self) -> u32 {
        self.state.position
    }

    /// Finish-line position of the current path.
    #[must_use]
    pub fn path_length(&self) -> Option<u32> {
        self.state.mode.map(|mode| self.path_lengths.get(mode))
    }

    /// Tiles left to the polling station.
    #[must_use]
    pub fn remaining(&self) -> Option<u32> {
        self.path_length()
            .map(|length| length.saturating_sub(self.state.position))
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> BoardPhase {
        match self.path_length() {
            None => BoardPhase::AtCrossroads,
            Some(_) if self.state.position == 0 => BoardPhase::AtCrossroads,
            Some(length) if self.state.position >= length => BoardPhase::Finished,
            Some(_) => BoardPhase::InTransit,
        }
    }

    /// Whether the player is at the polling station.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase() == BoardPhase::Finished
    }

    /// Start a new leg on `mode` at tile 0.
    pub fn select_mode(&mut self, mode: TransportMode) {
        debug!(%mode, previous = ?self.state.mode, "transport mode selected");
        self.state = BoardState {
            mode: Some(mode),
            position: 0,
        };
    }

    /// Move by `delta` tiles, clamped to the path.
    pub fn apply_step(&mut self, delta: i32) -> Result<StepOutcome> {
        let length = self.path_length().ok_or(GameError::NoTransportMode)?;
        if self.is_finished() && !self.allow_play_past_finish {
            return Err(GameError::JourneyFinished);
        }

        let from = self.state.position;
        let to = (i64::from(from) + i64::from(delta)).clamp(0, i64::from(length)) as u32;
        self.state.position = to;

        let returned_to_crossroads = delta < 0 && from > 0 && to == 0;
        if returned_to_crossroads {
            self.state.mode = None;
        }
        let won = to == length && from < length;

        let outcome = StepOutcome {
            from,
            to,
            phase: self.phase(),
            won,
            returned_to_crossroads,
        };
        if won {
            info!(mode = ?self.state.mode, position = to, "reached the polling station");
        } else {
            debug!(from, to, delta, phase = ?outcome.phase, "step applied");
        }
        Ok(outcome)
    }

    /// Go back to the crossroads; the mode must be rolled again.
    pub fn apply_crossroads(&mut self) {
        debug!(mode = ?self.state.mode, position = self.state.position, "back to the crossroads");
        self.state = BoardState::default();
    }

    /// Leave the `Finished` state for a fresh crossroads.
    ///
    /// Returns `false` (and changes nothing) when the player has not
    /// finished.
    pub fn acknowledge_win(&mut self) -> bool {
        if !self.is_finished() {
            return false;
        }
        self.state = BoardState::default();
        true
    }

    /// Adopt a persisted board state, clamping it back into range.
    pub fn restore(&mut self, state: BoardState) {
        let mut state = state;
        match state.mode {
            None if state.position != 0 => {
                warn!(position = state.position, "restored position without a mode; resetting to 0");
                state.position = 0;
            }
            Some(mode) if state.position > self.path_lengths.get(mode) => {
                let length = self.path_lengths.get(mode);
                warn!(%mode, position = state.position, length, "restored position past the finish; clamping");
                state.position = length;
            }
            _ => {}
        }
        self.state = state;
    }
}
