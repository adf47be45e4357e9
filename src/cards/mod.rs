//! Card system: definitions, content records, catalog, provider boundary.
//!
//! ## Key Types
//!
//! - `CardId`: Identifier for a card
//! - `Card`: Validated scenario card with ordered outcomes
//! - `CardAction`: Typed board effect (`Nothing`, `ReturnToCrossroads`, `Move`)
//! - `RollSet`: Die faces that select an outcome
//! - `CardRecord`: Raw content-store shape, validated into `Card`
//! - `CardCatalog`: Cards grouped by transport tag
//! - `CardProvider`: Trait the session fetches cards through
//!
//! ## Validation
//!
//! Content defects (bad roll sets, unknown action codes) are rejected
//! when a card is ingested, never when its action is applied.

pub mod catalog;
pub mod definition;
mod error;
pub mod provider;
pub mod record;

pub use catalog::CardCatalog;
pub use definition::{Card, CardAction, CardId, Outcome, RollSet, Steps};
pub use error::CatalogError;
pub use provider::CardProvider;
pub use record::CardRecord;
