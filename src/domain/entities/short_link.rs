//! Short link entity: one short code mapped to one original URL.

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A persisted mapping from a short code to its original URL.
///
/// Records are written once and never updated. `short` is unique across the
/// whole registry; the database enforces it with a unique index.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ShortLink {
    pub id: i64,
    pub original: String,
    pub short: String,
    pub created_at: DateTime<Utc>,
}

impl ShortLink {
    pub fn new(id: i64, original: String, short: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            original,
            short,
            created_at,
        }
    }
}

/// Input for inserting a new short link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShortLink {
    pub original: String,
    pub short: String,
}

impl NewShortLink {
    pub fn new(original: impl Into<String>, short: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            short: short.into(),
        }
    }
}

/// Outcome of an insert-if-absent against the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Insertion {
    /// The code was free and the record is now stored.
    Inserted(ShortLink),
    /// Another record already owns the code; nothing was written.
    Taken,
}
