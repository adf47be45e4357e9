//! Card catalog for content lookup.
//!
//! The `CardCatalog` stores every validated card and groups them by
//! transport tag. It is the in-process `CardProvider`: frontends that
//! fetch from a remote store build one from the fetched records.

use std::fs;
use std::path::Path;

use rustc_hash::FxHashMap;

use crate::core::{CardTransport, TransportMode};

use super::definition::{Card, CardId};
use super::error::CatalogError;
use super::provider::CardProvider;
use super::record::CardRecord;

/// Immutable-after-load collection of cards keyed by transport tag.
///
/// ## Example
///
/// ```
/// use polling_path::cards::CardCatalog;
/// use polling_path::core::TransportMode;
///
/// let catalog = CardCatalog::from_json_str(r#"[
///   {"id": "b1", "transportType": "bus",
///    "outcomes": {"1,2,3,4,5,6": ["1", "On time"]}},
///   {"id": "a1", "transportType": "any",
///    "outcomes": {"1,2,3,4,5,6": ["nothing", "Rain"]}}
/// ]"#).unwrap();
///
/// assert_eq!(catalog.len(), 2);
/// assert_eq!(catalog.eligible(TransportMode::Bus).len(), 2);
/// assert_eq!(catalog.eligible(TransportMode::Bicycle).len(), 1);
/// ```
#[derive(Clone, Debug, Default)]
pub struct CardCatalog {
    by_transport: FxHashMap<CardTransport, Vec<Card>>,
    index: FxHashMap<CardId, CardTransport>,
}

impl CardCatalog {
    /// Create a new empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a card.
    ///
    /// Fails if a card with the same ID is already present, or the card
    /// was built without outcomes.
    pub fn insert(&mut self, card: Card) -> Result<(), CatalogError> {
        if card.outcomes.is_empty() {
            return Err(CatalogError::NoOutcomes { card: card.id });
        }
        if self.index.contains_key(&card.id) {
            return Err(CatalogError::DuplicateId { card: card.id });
        }
        self.index.insert(card.id.clone(), card.transport);
        self.by_transport.entry(card.transport).or_default().push(card);
        Ok(())
    }

    /// Build a catalog from raw content records, validating every card.
    pub fn from_records(records: impl IntoIterator<Item = CardRecord>) -> Result<Self, CatalogError> {
        let mut catalog = Self::new();
        for record in records {
            catalog.insert(Card::try_from(record)?)?;
        }
        Ok(catalog)
    }

    /// Parse a JSON array of card records.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<CardRecord> = serde_json::from_str(json)?;
        Self::from_records(records)
    }

    /// Read a JSON array of card records from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Get a card by ID.
    #[must_use]
    pub fn get(&self, id: &CardId) -> Option<&Card> {
        let transport = self.index.get(id)?;
        self.by_transport
            .get(transport)?
            .iter()
            .find(|card| &card.id == id)
    }

    /// Check if a card ID is present.
    #[must_use]
    pub fn contains(&self, id: &CardId) -> bool {
        self.index.contains_key(id)
    }

    /// Cards carrying exactly this transport tag, in insertion order.
    #[must_use]
    pub fn cards_for(&self, transport: CardTransport) -> &[Card] {
        self.by_transport.get(&transport).map_or(&[], Vec::as_slice)
    }

    /// Cards drawable on `mode`: the mode's own cards followed by `Any` cards.
    #[must_use]
    pub fn eligible(&self, mode: TransportMode) -> Vec<Card> {
        self.cards_for(mode.into())
            .iter()
            .chain(self.cards_for(CardTransport::Any))
            .cloned()
            .collect()
    }

    /// Get the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Check if the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Iterate over all cards, grouped by transport tag.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        CardTransport::ALL
            .into_iter()
            .flat_map(move |transport| self.cards_for(transport).iter())
    }
}

impl CardProvider for CardCatalog {
    fn fetch_cards(&self, mode: TransportMode) -> Result<Vec<Card>, CatalogError> {
        Ok(self.eligible(mode))
    }
}
