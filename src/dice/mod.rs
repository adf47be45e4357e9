//! Dice: the die face type, the die itself, and the roll tables.

mod resolver;
mod roll;

pub use resolver::{action_for_roll, mode_for_roll, Dice};
pub use roll::DieRoll;
