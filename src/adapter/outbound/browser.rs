//! Browser listing sink.

use async_trait::async_trait;
use tracing::debug;

use crate::domain::Listing;
use crate::error::{Error, Result, SinkError};
use crate::port::ListingSink;

/// Opens each new listing in the default browser.
///
/// The launcher can block until the browser process returns, so it runs on
/// the blocking pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserSink;

#[async_trait]
impl ListingSink for BrowserSink {
    fn name(&self) -> &str {
        "browser"
    }

    async fn handle(&self, listing: &Listing) -> Result<()> {
        let link = listing.link().to_string();
        debug!(link = %link, "Opening listing in browser");

        tokio::task::spawn_blocking(move || open::that(&link))
            .await
            .map_err(|e| Error::from(SinkError::Delivery(e.to_string())))?
            .map_err(|e| SinkError::Browser(e).into())
    }
}
