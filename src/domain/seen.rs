//! Seen-listing records.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::listing::Listing;

/// Outcome of an insert-if-absent against the seen store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeenOutcome {
    /// The link was not known; it is now recorded.
    New,
    /// The link was already recorded by an earlier cycle.
    AlreadySeen,
}

impl SeenOutcome {
    #[must_use]
    pub const fn is_new(self) -> bool {
        matches!(self, Self::New)
    }
}

/// A persisted "already notified" entry.
#[derive(Debug, Clone, Serialize)]
pub struct SeenRecord {
    pub link: String,
    pub source: String,
    pub name: String,
    pub price: String,
    pub address: String,
    pub first_seen: DateTime<Utc>,
}

impl SeenRecord {
    /// Build a record for a listing first seen at `first_seen`.
    #[must_use]
    pub fn from_listing(listing: &Listing, first_seen: DateTime<Utc>) -> Self {
        Self {
            link: listing.link().to_string(),
            source: listing.source().to_string(),
            name: listing.name().to_string(),
            price: listing.price().to_string(),
            address: listing.address().to_string(),
            first_seen,
        }
    }
}
