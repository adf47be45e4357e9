//! Dice resolution - turning die faces into modes and card outcomes.
//!
//! Two tables are fixed here:
//!
//! | Roll | Crossroads mode |
//! |------|-----------------|
//! | 1-3  | Bus             |
//! | 4-5  | Carpool         |
//! | 6    | Bicycle         |
//!
//! and the in-card table, which comes from each card's outcomes. A roll
//! that no outcome claims falls back to the first-declared outcome.

use crate::cards::{Card, Outcome};
use crate::core::{GameRng, GameRngState, TransportMode};

use super::roll::DieRoll;

/// Crossroads table: which path a roll sends the player down.
#[must_use]
pub const fn mode_for_roll(roll: DieRoll) -> TransportMode {
    match roll.value() {
        1..=3 => TransportMode::Bus,
        4 | 5 => TransportMode::Carpool,
        _ => TransportMode::Bicycle,
    }
}

/// The outcome of `card` selected by `roll`.
///
/// Returns `None` only for a card without outcomes, which catalog
/// ingestion never lets through.
#[must_use]
pub fn action_for_roll(card: &Card, roll: DieRoll) -> Option<&Outcome> {
    card.outcomes
        .iter()
        .find(|outcome| outcome.rolls.contains(roll))
        .or_else(|| card.outcomes.first())
}

/// Six-sided die backed by a dedicated RNG stream.
#[derive(Clone, Debug)]
pub struct Dice {
    rng: GameRng,
}

impl Dice {
    /// Create a die drawing from `rng`.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }

    /// Roll once; uniform over 1-6.
    pub fn roll_die(&mut self) -> DieRoll {
        DieRoll::saturating(self.rng.roll_inclusive(DieRoll::MIN, DieRoll::MAX))
    }

    /// Roll and look up the crossroads table.
    pub fn roll_for_mode(&mut self) -> (DieRoll, TransportMode) {
        let roll = self.roll_die();
        (roll, mode_for_roll(roll))
    }

    /// Position of the underlying stream.
    #[must_use]
    pub fn rng_state(&self) -> GameRngState {
        self.rng.state()
    }

    /// Resume a die from a saved stream position.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        Self::new(GameRng::from_state(state))
    }
}
