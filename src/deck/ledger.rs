//! Drawn-card ledger for draw-without-replacement.
//!
//! The `DeckLedger` does not hold cards. It records which card IDs have
//! been drawn, one bucket per transport tag, so that availability can be
//! recomputed from any catalog snapshot:
//!
//! ```text
//! available(mode) = { c | c.transport == mode && c.id ∉ ledger[mode] }
//!                 ∪ { c | c.transport == any  && c.id ∉ ledger[any]  }
//! ```
//!
//! Buckets are `im` persistent sets, so copying the ledger into a
//! snapshot after every draw is O(1).

use im::OrdSet;
use serde::{Deserialize, Serialize};

use crate::cards::{Card, CardId};
use crate::core::{CardTransport, TransportMode};

/// Drawn card IDs per transport tag.
///
/// ## Usage
///
/// ```
/// use polling_path::cards::CardId;
/// use polling_path::core::{CardTransport, TransportMode};
/// use polling_path::deck::DeckLedger;
///
/// let mut ledger = DeckLedger::new();
/// ledger.mark_drawn(TransportMode::Bus.into(), CardId::new("b1"));
///
/// assert!(ledger.is_drawn(TransportMode::Bus.into(), &CardId::new("b1")));
/// assert!(!ledger.is_drawn(CardTransport::Any, &CardId::new("b1")));
///
/// ledger.reset();
/// assert!(ledger.is_empty());
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckLedger {
    #[serde(default)]
    any: OrdSet<CardId>,
    #[serde(default)]
    bus: OrdSet<CardId>,
    #[serde(default)]
    carpool: OrdSet<CardId>,
    #[serde(default)]
    bicycle: OrdSet<CardId>,
}

impl DeckLedger {
    /// Create an empty ledger (start of a journey).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn bucket(&self, transport: CardTransport) -> &OrdSet<CardId> {
        match transport {
            CardTransport::Any => &self.any,
            CardTransport::Mode(TransportMode::Bus) => &self.bus,
            CardTransport::Mode(TransportMode::Carpool) => &self.carpool,
            CardTransport::Mode(TransportMode::Bicycle) => &self.bicycle,
        }
    }

    fn bucket_mut(&mut self, transport: CardTransport) -> &mut OrdSet<CardId> {
        match transport {
            CardTransport::Any => &mut self.any,
            CardTransport::Mode(TransportMode::Bus) => &mut self.bus,
            CardTransport::Mode(TransportMode::Carpool) => &mut self.carpool,
            CardTransport::Mode(TransportMode::Bicycle) => &mut self.bicycle,
        }
    }

    /// Record `id` as drawn in the bucket for `transport`.
    ///
    /// `transport` is the card's own tag, so `Any` cards land in the `Any`
    /// bucket whichever path they were drawn on. Returns `false` if the
    /// ID was already recorded.
    pub fn mark_drawn(&mut self, transport: CardTransport, id: CardId) -> bool {
        self.bucket_mut(transport).insert(id).is_none()
    }

    /// Record a drawn card under its own transport tag.
    pub fn mark_card(&mut self, card: &Card) -> bool {
        self.mark_drawn(card.transport, card.id.clone())
    }

    /// Check if `id` is recorded in the bucket for `transport`.
    #[must_use]
    pub fn is_drawn(&self, transport: CardTransport, id: &CardId) -> bool {
        self.bucket(transport).contains(id)
    }

    /// Drawn IDs in one bucket, in ID order.
    pub fn drawn(&self, transport: CardTransport) -> impl Iterator<Item = &CardId> {
        self.bucket(transport).iter()
    }

    /// Cards from `cards` that can still be drawn on `mode`.
    ///
    /// Cards tagged for a different mode are never available.
    #[must_use]
    pub fn available<'a>(&self, mode: TransportMode, cards: &'a [Card]) -> Vec<&'a Card> {
        cards
            .iter()
            .filter(|card| card.transport.matches(mode))
            .filter(|card| !self.is_drawn(card.transport, &card.id))
            .collect()
    }

    /// Forget every drawn card in all four buckets.
    pub fn reset(&mut self) {
        for transport in CardTransport::ALL {
            self.bucket_mut(transport).clear();
        }
    }

    /// Total number of recorded IDs.
    #[must_use]
    pub fn len(&self) -> usize {
        CardTransport::ALL
            .into_iter()
            .map(|transport| self.bucket(transport).len())
            .sum()
    }

    /// Check if nothing has been drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardAction, Outcome, RollSet};

    fn card(id: &str, transport: CardTransport) -> Card {
        Card::new(CardId::new(id), transport, "test").with_outcome(Outcome {
            rolls: RollSet::ALL,
            action: CardAction::Nothing,
            text: "ok".into(),
        })
    }

    fn deck() -> Vec<Card> {
        vec![
            card("b1", TransportMode::Bus.into()),
            card("b2", TransportMode::Bus.into()),
            card("c1", TransportMode::Carpool.into()),
            card("a1", CardTransport::Any),
        ]
    }

    fn ids(cards: Vec<&Card>) -> Vec<&str> {
        cards.into_iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_available_filters_by_mode() {
        let ledger = DeckLedger::new();
        let cards = deck();
        assert_eq!(ids(ledger.available(TransportMode::Bus, &cards)), vec!["b1", "b2", "a1"]);
        assert_eq!(ids(ledger.available(TransportMode::Bicycle, &cards)), vec!["a1"]);
    }

    #[test]
    fn test_drawn_cards_are_unavailable() {
        let mut ledger = DeckLedger::new();
        let cards = deck();

        assert!(ledger.mark_card(&cards[0]));
        assert!(ledger.mark_card(&cards[3]));
        assert_eq!(ids(ledger.available(TransportMode::Bus, &cards)), vec!["b2"]);

        // Any cards drawn on one path stay drawn on the others.
        assert!(ledger.available(TransportMode::Bicycle, &cards).is_empty());
    }

    #[test]
    fn test_mark_drawn_is_idempotent() {
        let mut ledger = DeckLedger::new();
        assert!(ledger.mark_drawn(CardTransport::Any, CardId::new("a1")));
        assert!(!ledger.mark_drawn(CardTransport::Any, CardId::new("a1")));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_buckets_are_separate() {
        let mut ledger = DeckLedger::new();
        ledger.mark_drawn(TransportMode::Carpool.into(), CardId::new("x"));
        assert!(!ledger.is_drawn(TransportMode::Bus.into(), &CardId::new("x")));
        assert!(!ledger.is_drawn(CardTransport::Any, &CardId::new("x")));
        assert_eq!(
            ledger.drawn(TransportMode::Carpool.into()).collect::<Vec<_>>(),
            vec![&CardId::new("x")]
        );
    }

    #[test]
    fn test_reset_clears_every_bucket() {
        let mut ledger = DeckLedger::new();
        for (i, transport) in CardTransport::ALL.into_iter().enumerate() {
            ledger.mark_drawn(transport, CardId::new(i.to_string()));
        }
        assert_eq!(ledger.len(), 4);

        ledger.reset();
        assert!(ledger.is_empty());
        let cards = deck();
        assert_eq!(ledger.available(TransportMode::Bus, &cards).len(), 3);
    }

    #[test]
    fn test_serde_round_trip() {
        let mut ledger = DeckLedger::new();
        ledger.mark_drawn(TransportMode::Bicycle.into(), CardId::new("k2"));
        ledger.mark_drawn(CardTransport::Any, CardId::new("a9"));

        let json = serde_json::to_string(&ledger).unwrap();
        let back: DeckLedger = serde_json::from_str(&json).unwrap();
        assert_eq!(ledger, back);

        let partial: DeckLedger = serde_json::from_str(r#"{"bus": ["b1"]}"#).unwrap();
        assert!(partial.is_drawn(TransportMode::Bus.into(), &CardId::new("b1")));
    }
}
