//! Card definitions - static scenario card data.
//!
//! A `Card` is immutable once ingested: its outcomes have already been
//! validated (roll sets disjoint, action codes typed), so gameplay code
//! never has to second-guess content.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

use crate::core::CardTransport;
use crate::dice::DieRoll;

/// Unique identifier for a card.
///
/// Content may use strings or integers; both are kept as text.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl<'de> Deserialize<'de> for CardId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(i64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(text) => Self(text),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}

/// Set of die faces that select an outcome.
///
/// Stored as a bitmask: bit `n` set means face `n` is in the set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RollSet(u8);

impl RollSet {
    /// Every face, 1 through 6.
    pub const ALL: RollSet = RollSet(0b0111_1110);

    /// Build a set from die rolls. Returns `None` if empty.
    #[must_use]
    pub fn from_rolls(rolls: impl IntoIterator<Item = DieRoll>) -> Option<Self> {
        let mask = rolls
            .into_iter()
            .fold(0u8, |mask, roll| mask | (1 << roll.value()));
        (mask != 0).then_some(Self(mask))
    }

    /// Parse a comma-separated list such as `"1, 2,3"`.
    pub fn parse(text: &str) -> Result<Self, String> {
        let mut rolls = Vec::new();
        for piece in text.split(',') {
            let piece = piece.trim();
            let value: u8 = piece
                .parse()
                .map_err(|_| format!("'{piece}' is not a die face"))?;
            let roll = DieRoll::new(value).ok_or_else(|| format!("{value} is outside 1-6"))?;
            rolls.push(roll);
        }
        Self::from_rolls(rolls).ok_or_else(|| "roll set is empty".to_string())
    }

    /// Check whether `roll` is in the set.
    #[must_use]
    pub fn contains(self, roll: DieRoll) -> bool {
        self.0 & (1 << roll.value()) != 0
    }

    /// Check that the two sets share no face.
    #[must_use]
    pub fn is_disjoint(self, other: RollSet) -> bool {
        self.0 & other.0 == 0
    }

    /// Union of two sets.
    #[must_use]
    pub fn union(self, other: RollSet) -> RollSet {
        RollSet(self.0 | other.0)
    }

    /// Faces in the set, lowest first.
    pub fn iter(self) -> impl Iterator<Item = DieRoll> {
        DieRoll::all().filter(move |&roll| self.contains(roll))
    }
}

impl fmt::Display for RollSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let faces: Vec<String> = self.iter().map(|r| r.to_string()).collect();
        f.write_str(&faces.join(","))
    }
}

/// Signed step count of a move action: `-3..=3`, never zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Steps(i8);

impl Steps {
    /// Largest absolute step a card can apply.
    pub const LIMIT: i8 = 3;

    /// Validate a step count.
    #[must_use]
    pub const fn new(steps: i8) -> Option<Self> {
        if steps != 0 && steps >= -Self::LIMIT && steps <= Self::LIMIT {
            Some(Self(steps))
        } else {
            None
        }
    }

    /// Get the signed step count.
    #[must_use]
    pub const fn get(self) -> i8 {
        self.0
    }
}

/// What a card outcome does to the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CardAction {
    /// Board unchanged.
    Nothing,
    /// Back to the crossroads; the player re-rolls a transport mode.
    ReturnToCrossroads,
    /// Move forward (positive) or backward (negative).
    Move(Steps),
}

impl CardAction {
    /// Content code for this action.
    #[must_use]
    pub fn code(self) -> String {
        match self {
            Self::Nothing => "nothing".to_string(),
            Self::ReturnToCrossroads => "crossroads".to_string(),
            Self::Move(steps) => steps.get().to_string(),
        }
    }
}

impl FromStr for CardAction {
    type Err = String;

    /// Accepts `"nothing"`, `"crossroads"` or a signed step count.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        match code.to_ascii_lowercase().as_str() {
            "nothing" => Ok(Self::Nothing),
            "crossroads" => Ok(Self::ReturnToCrossroads),
            _ => code
                .parse::<i8>()
                .ok()
                .and_then(Steps::new)
                .map(Self::Move)
                .ok_or_else(|| code.to_string()),
        }
    }
}

impl fmt::Display for CardAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}

/// One dice-conditioned result printed on a card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Outcome {
    /// Faces that select this outcome.
    pub rolls: RollSet,
    /// Board effect.
    pub action: CardAction,
    /// Text shown to the player.
    pub text: String,
}

/// Scenario card.
///
/// ## Example
///
/// ```
/// use polling_path::cards::{Card, CardAction, CardId, Outcome, RollSet, Steps};
/// use polling_path::core::{CardTransport, TransportMode};
///
/// let card = Card::new(CardId::new("b1"), TransportMode::Bus.into(), "Bus is late")
///     .with_outcome(Outcome {
///         rolls: RollSet::parse("1,2,3").unwrap(),
///         action: CardAction::Move(Steps::new(2).unwrap()),
///         text: "It shows up after all".into(),
///     })
///     .with_outcome(Outcome {
///         rolls: RollSet::parse("4,5,6").unwrap(),
///         action: CardAction::Move(Steps::new(-2).unwrap()),
///         text: "You walk back home".into(),
///     });
///
/// assert!(card.needs_roll());
/// assert_eq!(card.transport, CardTransport::Mode(TransportMode::Bus));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "super::record::CardRecord", into = "super::record::CardRecord")]
pub struct Card {
    /// Unique identifier.
    pub id: CardId,

    /// Path(s) the card can be drawn on.
    pub transport: CardTransport,

    /// Election tag (currently always "federal").
    pub election_type: String,

    /// Educational link, if any.
    pub url: Option<String>,

    /// Scenario text.
    pub description: String,

    /// Outcomes in declaration order.
    pub outcomes: SmallVec<[Outcome; 2]>,
}

impl Card {
    /// Election tag used when content does not specify one.
    pub const DEFAULT_ELECTION_TYPE: &'static str = "federal";

    /// Create a card without outcomes.
    ///
    /// Add at least one outcome before handing the card to a catalog.
    #[must_use]
    pub fn new(id: CardId, transport: CardTransport, description: impl Into<String>) -> Self {
        Self {
            id,
            transport,
            election_type: Self::DEFAULT_ELECTION_TYPE.to_string(),
            url: None,
            description: description.into(),
            outcomes: SmallVec::new(),
        }
    }

    /// Add an outcome (builder pattern).
    #[must_use]
    pub fn with_outcome(mut self, outcome: Outcome) -> Self {
        self.outcomes.push(outcome);
        self
    }

    /// Attach an educational link.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Whether resolving this card needs a die roll.
    #[must_use]
    pub fn needs_roll(&self) -> bool {
        self.outcomes.len() > 1
    }

    /// The unconditional outcome of a single-outcome card.
    #[must_use]
    pub fn single_outcome(&self) -> Option<&Outcome> {
        match self.outcomes.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}
