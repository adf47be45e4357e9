//! Transport modes and card transport tags.
//!
//! A journey leg always runs on one `TransportMode`. Cards carry a
//! `CardTransport` tag, which is either one of the modes or `Any` for
//! cards that can turn up on every path.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The path a player is travelling on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    /// Bus route (longest path).
    Bus,
    /// Shared ride.
    Carpool,
    /// Bicycle route.
    Bicycle,
}

impl TransportMode {
    /// Every mode, in crossroads roll order.
    pub const ALL: [TransportMode; 3] = [Self::Bus, Self::Carpool, Self::Bicycle];

    /// Lowercase name used in content and persisted data.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bus => "bus",
            Self::Carpool => "carpool",
            Self::Bicycle => "bicycle",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransportMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match CardTransport::from_str(s)? {
            CardTransport::Mode(mode) => Ok(mode),
            CardTransport::Any => Err(format!("'{s}' is not a transport mode")),
        }
    }
}

/// Transport tag on a card.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CardTransport {
    /// Card can be drawn on any path.
    Any,
    /// Card belongs to a single path.
    Mode(TransportMode),
}

impl CardTransport {
    /// Every tag: `Any` followed by each mode.
    pub const ALL: [CardTransport; 4] = [
        Self::Any,
        Self::Mode(TransportMode::Bus),
        Self::Mode(TransportMode::Carpool),
        Self::Mode(TransportMode::Bicycle),
    ];

    /// Lowercase name used in content.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Mode(mode) => mode.as_str(),
        }
    }

    /// Whether a card with this tag can be drawn on `mode`.
    #[must_use]
    pub fn matches(self, mode: TransportMode) -> bool {
        match self {
            Self::Any => true,
            Self::Mode(m) => m == mode,
        }
    }
}

impl From<TransportMode> for CardTransport {
    fn from(mode: TransportMode) -> Self {
        Self::Mode(mode)
    }
}

impl fmt::Display for CardTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardTransport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "any" => Ok(Self::Any),
            "bus" => Ok(Self::Mode(TransportMode::Bus)),
            "carpool" => Ok(Self::Mode(TransportMode::Carpool)),
            "bicycle" | "bike" => Ok(Self::Mode(TransportMode::Bicycle)),
            other => Err(format!("unknown transport type '{other}'")),
        }
    }
}

impl Serialize for CardTransport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for CardTransport {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
