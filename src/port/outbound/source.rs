//! Listing source port.

use async_trait::async_trait;

use crate::domain::Listing;
use crate::error::Result;

/// A site or feed producing candidate listings.
///
/// Implementations return an empty vector when the site simply has nothing
/// to offer (including "page never became ready"); an `Err` is reserved for
/// genuine transport or parse failures. Listings should come newest-first,
/// since that is the order the user is notified in.
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Stable source name, used as its health identity and in alerts.
    fn name(&self) -> &str;

    /// Fetch the current listings.
    async fn fetch(&self) -> Result<Vec<Listing>>;
}
