//! Notebook of educational links the player has opened.
//!
//! The notebook outlives journeys: resetting progress never touches it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cards::Card;

/// A visited link.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotebookEntry {
    /// Identifier of the entry (the card ID for card links).
    pub id: String,
    /// Link target; the deduplication key.
    pub url: String,
    /// Text shown next to the link.
    pub description: String,
    /// When the link was first recorded (serialized as RFC 3339).
    pub timestamp: DateTime<Utc>,
}

impl NotebookEntry {
    /// Create an entry stamped with the current time.
    pub fn new(id: impl Into<String>, url: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            description: description.into(),
            timestamp: Utc::now(),
        }
    }

    /// Entry for a card's link, if it has one.
    pub fn from_card(card: &Card) -> Option<Self> {
        let url = card.url.as_deref()?;
        Some(Self::new(card.id.as_str(), url, card.description.clone()))
    }
}

/// Append-only log of entries, unique by url.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Notebook {
    entries: Vec<NotebookEntry>,
}

impl Notebook {
    /// Create an empty notebook.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` unless its url is already present.
    ///
    /// Returns `true` if the entry was added.
    pub fn append_if_absent(&mut self, entry: NotebookEntry) -> bool {
        if self.contains_url(&entry.url) {
            return false;
        }
        self.entries.push(entry);
        true
    }

    /// Check if `url` has been recorded.
    #[must_use]
    pub fn contains_url(&self, url: &str) -> bool {
        self.entries.iter().any(|entry| entry.url == url)
    }

    /// Entries in the order they were recorded.
    #[must_use]
    pub fn entries(&self) -> &[NotebookEntry] {
        &self.entries
    }

    /// Number of recorded links.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if nothing was recorded yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
