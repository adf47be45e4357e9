//! Card content errors.

use super::definition::CardId;

/// Errors raised while ingesting or fetching card content.
///
/// Every variant except `Unavailable` is a content-authoring defect: the
/// card is rejected at load time so gameplay never sees it.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("malformed card content: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read card content from {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("card {card} has no outcomes")]
    NoOutcomes { card: CardId },

    #[error("card {card} has an invalid roll set '{key}': {reason}")]
    InvalidRollSet {
        card: CardId,
        key: String,
        reason: String,
    },

    #[error("card {card} has overlapping roll sets")]
    OverlappingRolls { card: CardId },

    #[error("card {card} has an invalid action code '{code}'")]
    InvalidAction { card: CardId, code: String },

    #[error("card {card} is defined more than once")]
    DuplicateId { card: CardId },

    #[error("card provider unavailable: {0}")]
    Unavailable(String),
}
