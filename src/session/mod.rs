//! Game session orchestration.
//!
//! ## Key Types
//!
//! - `GameSession`: board, ledger, dice and persistence for one player
//! - `SharedSession`: mutex-guarded handle that drops overlapping intents
//! - `DrawnCard`, `ActionOutcome`, `CrossroadsRoll`: intent results

mod orchestrator;
mod shared;

pub use orchestrator::{ActionOutcome, CrossroadsRoll, DrawnCard, GameSession};
pub use shared::{Attempt, SharedSession};
