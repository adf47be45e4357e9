//! Content-store shape of a card and its validation.
//!
//! Catalog JSON looks like:
//!
//! ```json
//! {"id": "b1", "transportType": "bus", "electionType": "federal",
//!  "url": "https://example.org", "description": "The bus is late",
//!  "outcomes": {"1,2,3": ["2", "It arrives"], "4,5,6": ["-2", "You walk"]}}
//! ```
//!
//! Outcome order in the map is the declaration order and is preserved,
//! since the first-declared outcome is the fallback for uncovered rolls.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use std::fmt;

use crate::core::CardTransport;

use super::definition::{Card, CardAction, CardId, Outcome, RollSet};
use super::error::CatalogError;

/// Action code as written by content authors: a string or a bare number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ActionCodeRecord {
    Text(String),
    Number(i64),
}

impl ActionCodeRecord {
    fn code(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::Number(n) => n.to_string(),
        }
    }
}

/// `(action code, outcome text)` pair.
pub type OutcomeRecord = (ActionCodeRecord, String);

/// Roll-set keyed outcome map that keeps declaration order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OutcomeMap(pub Vec<(String, OutcomeRecord)>);

impl Serialize for OutcomeMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, outcome) in &self.0 {
            map.serialize_entry(key, outcome)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for OutcomeMap {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedVisitor;

        impl<'de> Visitor<'de> for OrderedVisitor {
            type Value = OutcomeMap;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from roll sets to [action, text] pairs")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(2));
                while let Some((key, value)) = access.next_entry::<String, OutcomeRecord>()? {
                    entries.push((key, value));
                }
                Ok(OutcomeMap(entries))
            }
        }

        deserializer.deserialize_map(OrderedVisitor)
    }
}

fn default_election_type() -> String {
    Card::DEFAULT_ELECTION_TYPE.to_string()
}

/// A card exactly as stored in the content store, before validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardRecord {
    pub id: CardId,
    pub transport_type: CardTransport,
    #[serde(default = "default_election_type")]
    pub election_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub outcomes: OutcomeMap,
}

impl TryFrom<CardRecord> for Card {
    type Error = CatalogError;

    fn try_from(record: CardRecord) -> Result<Self, Self::Error> {
        let card_id = record.id;
        let single = record.outcomes.0.len() == 1;
        if record.outcomes.0.is_empty() {
            return Err(CatalogError::NoOutcomes { card: card_id });
        }

        let mut outcomes = SmallVec::new();
        let mut covered: Option<RollSet> = None;
        for (key, (code, text)) in record.outcomes.0 {
            // The roll set of a lone outcome is never consulted.
            let rolls = if single && key.trim().is_empty() {
                RollSet::ALL
            } else {
                RollSet::parse(&key).map_err(|reason| CatalogError::InvalidRollSet {
                    card: card_id.clone(),
                    key: key.clone(),
                    reason,
                })?
            };
            if covered.is_some_and(|seen| !seen.is_disjoint(rolls)) {
                return Err(CatalogError::OverlappingRolls { card: card_id });
            }
            covered = Some(covered.map_or(rolls, |seen| seen.union(rolls)));

            let raw = code.code();
            let action = raw
                .parse::<CardAction>()
                .map_err(|code| CatalogError::InvalidAction {
                    card: card_id.clone(),
                    code,
                })?;
            outcomes.push(Outcome {
                rolls,
                action,
                text,
            });
        }

        Ok(Card {
            id: card_id,
            transport: record.transport_type,
            election_type: record.election_type,
            url: record.url.filter(|url| !url.trim().is_empty()),
            description: record.description,
            outcomes,
        })
    }
}

impl From<Card> for CardRecord {
    fn from(card: Card) -> Self {
        let outcomes = card
            .outcomes
            .into_iter()
            .map(|o| {
                let code = ActionCodeRecord::Text(o.action.code());
                (o.rolls.to_string(), (code, o.text))
            })
            .collect();

        Self {
            id: card.id,
            transport_type: card.transport,
            election_type: card.election_type,
            url: card.url,
            description: card.description,
            outcomes: OutcomeMap(outcomes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TransportMode;
    use crate::dice::DieRoll;

    fn parse(json: &str) -> Result<Card, CatalogError> {
        let record: CardRecord = serde_json::from_str(json)?;
        Card::try_from(record)
    }

    #[test]
    fn test_preserves_declaration_order() {
        let card = parse(
            r#"{"id": "c1", "transportType": "carpool", "description": "Flat tire",
                "outcomes": {"5,6": ["1", "Fixed fast"], "1,2": ["-1", "Slow fix"]}}"#,
        )
        .unwrap();

        assert_eq!(card.transport, CardTransport::Mode(TransportMode::Carpool));
        assert_eq!(card.outcomes[0].text, "Fixed fast");
        assert_eq!(card.outcomes[1].text, "Slow fix");
        assert!(card.outcomes[0].rolls.contains(DieRoll::new(6).unwrap()));
        assert_eq!(card.election_type, "federal");
    }

    #[test]
    fn test_numeric_codes_and_ids() {
        let card = parse(
            r#"{"id": 4, "transportType": "any", "url": "",
                "outcomes": {"1": [2, "Go"], "2": ["crossroads", "Back"]}}"#,
        )
        .unwrap();

        assert_eq!(card.id, CardId::new("4"));
        assert_eq!(card.url, None);
        assert!(matches!(card.outcomes[0].action, CardAction::Move(s) if s.get() == 2));
        assert_eq!(card.outcomes[1].action, CardAction::ReturnToCrossroads);
    }

    #[test]
    fn test_single_outcome_blank_key() {
        let card = parse(
            r#"{"id": "a1", "transportType": "any",
                "outcomes": {"": ["nothing", "Nice weather"]}}"#,
        )
        .unwrap();
        assert_eq!(card.outcomes[0].rolls, RollSet::ALL);
    }

    #[test]
    fn test_rejects_bad_content() {
        let err = parse(r#"{"id": "x", "transportType": "bus", "outcomes": {}}"#).unwrap_err();
        assert!(matches!(err, CatalogError::NoOutcomes { .. }));

        let err = parse(
            r#"{"id": "x", "transportType": "bus",
                "outcomes": {"1,2": ["1", "a"], "2,3": ["1", "b"]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::OverlappingRolls { .. }));

        let err = parse(
            r#"{"id": "x", "transportType": "bus",
                "outcomes": {"1": ["5", "a"], "2": ["1", "b"]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidAction { code, .. } if code == "5"));

        let err = parse(
            r#"{"id": "x", "transportType": "bus",
                "outcomes": {"": ["1", "a"], "2": ["1", "b"]}}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::InvalidRollSet { .. }));

        assert!(parse(r#"{"id": "x", "transportType": "train", "outcomes": {}}"#).is_err());
    }

    #[test]
    fn test_card_serde_round_trip() {
        let json = r#"{"id": "b2", "transportType": "bus", "description": "Detour",
                       "outcomes": {"1,2,3": ["+1", "Short"], "4,5,6": ["-3", "Long"]}}"#;
        let card: Card = serde_json::from_str(json).unwrap();
        let back: Card = serde_json::from_str(&serde_json::to_string(&card).unwrap()).unwrap();
        assert_eq!(card, back);
    }
}
