//! Board position engine: bounded movement along a path and win detection.

mod engine;

pub use engine::{BoardEngine, BoardPhase, BoardState, StepOutcome};
