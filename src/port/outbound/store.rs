//! Seen-listing persistence port.

use async_trait::async_trait;

use crate::domain::{Listing, SeenOutcome};
use crate::error::Result;

/// Durable registry of already-notified listings, keyed by link.
///
/// `record_if_new` must be an atomic insert-if-absent: a concurrent or
/// repeated insert of the same link reports [`SeenOutcome::AlreadySeen`]
/// rather than erroring. Any `Err` is a genuine storage failure.
#[async_trait]
pub trait SeenStore: Send + Sync {
    /// Record the listing unless its link is already known.
    async fn record_if_new(&self, listing: &Listing) -> Result<SeenOutcome>;

    /// Number of listings recorded so far.
    async fn count(&self) -> Result<u64>;
}
