//! Die faces.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single six-sided die face, always in `1..=6`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct DieRoll(u8);

impl DieRoll {
    /// Smallest face.
    pub const MIN: u8 = 1;
    /// Largest face.
    pub const MAX: u8 = 6;

    /// Validate a face value.
    #[must_use]
    pub const fn new(value: u8) -> Option<Self> {
        if value >= Self::MIN && value <= Self::MAX {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Clamp any value onto the die.
    #[must_use]
    pub const fn saturating(value: u8) -> Self {
        if value < Self::MIN {
            Self(Self::MIN)
        } else if value > Self::MAX {
            Self(Self::MAX)
        } else {
            Self(value)
        }
    }

    /// Get the face value.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Every face, lowest first.
    pub fn all() -> impl Iterator<Item = DieRoll> {
        (Self::MIN..=Self::MAX).map(DieRoll)
    }
}

impl TryFrom<u8> for DieRoll {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("die roll {value} is outside 1-6"))
    }
}

impl From<DieRoll> for u8 {
    fn from(roll: DieRoll) -> Self {
        roll.0
    }
}

impl fmt::Display for DieRoll {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds() {
        assert!(DieRoll::new(0).is_none());
        assert!(DieRoll::new(7).is_none());
        assert_eq!(DieRoll::new(6).map(DieRoll::value), Some(6));
        assert_eq!(DieRoll::all().count(), 6);
        assert_eq!(DieRoll::saturating(0).value(), 1);
        assert_eq!(DieRoll::saturating(9).value(), 6);
    }

    #[test]
    fn test_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<DieRoll>("9").is_err());
        let roll: DieRoll = serde_json::from_str("4").unwrap();
        assert_eq!(roll.value(), 4);
    }
}
