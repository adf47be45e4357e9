//! Boundary with the card content store.

use std::sync::Arc;

use crate::core::TransportMode;

use super::definition::Card;
use super::error::CatalogError;

/// Source of scenario cards.
///
/// Implementations return every card whose transport tag equals `mode`
/// or is `Any`. The session treats the result as an immutable snapshot
/// for the rest of the journey.
pub trait CardProvider: Send + Sync {
    /// Fetch the cards drawable on `mode`.
    fn fetch_cards(&self, mode: TransportMode) -> Result<Vec<Card>, CatalogError>;
}

impl<P: CardProvider + ?Sized> CardProvider for Arc<P> {
    fn fetch_cards(&self, mode: TransportMode) -> Result<Vec<Card>, CatalogError> {
        (**self).fetch_cards(mode)
    }
}

impl<P: CardProvider + ?Sized> CardProvider for Box<P> {
    fn fetch_cards(&self, mode: TransportMode) -> Result<Vec<Card>, CatalogError> {
        (**self).fetch_cards(mode)
    }
}
