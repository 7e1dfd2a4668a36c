//! Listing sink port.

use async_trait::async_trait;

use crate::domain::Listing;
use crate::error::Result;

/// A human-facing channel that new listings are delivered to.
///
/// # Implementation Notes
///
/// - Sinks are invoked concurrently with other sinks for the same listing
///   and must not assume any ordering relative to them.
/// - A sink that needs pacing (e.g. a chat API rate limit) owns it, either
///   by blocking inside `handle` or by queueing internally and draining on
///   its own worker.
/// - Queueing sinks override [`ListingSink::drain`] so the process can wait
///   for pending deliveries before exit.
#[async_trait]
pub trait ListingSink: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Deliver a newly seen listing.
    async fn handle(&self, listing: &Listing) -> Result<()>;

    /// Wait until everything accepted by `handle` has been delivered.
    async fn drain(&self) {}
}
