//! Deck tracking for draw-without-replacement.
//!
//! A "deck" is not a stored pile: it is the catalog snapshot for a mode
//! filtered through the `DeckLedger` of already drawn IDs.

mod ledger;

pub use ledger::DeckLedger;
