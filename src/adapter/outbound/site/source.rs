//! HTML listing source.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::Instant;
use tracing::{debug, info, warn};

use super::fetcher::PageFetcher;
use super::parser::ListingParser;
use super::profile::SiteProfile;
use crate::domain::Listing;
use crate::error::Result;
use crate::port::ListingSource;

/// A [`ListingSource`] that scrapes one search-results page.
///
/// Profiles with a ready marker re-fetch the page every `poll_interval`
/// until the marker appears. Hitting the deadline first yields an empty
/// result, which the health tracker reports like any other empty page.
pub struct HtmlListingSource {
    profile: SiteProfile,
    parser: ListingParser,
    fetcher: Arc<dyn PageFetcher>,
}

impl HtmlListingSource {
    /// Create a source for `profile`.
    ///
    /// # Errors
    /// Returns an error if the profile's selectors or base URL are invalid.
    pub fn new(profile: SiteProfile, fetcher: Arc<dyn PageFetcher>) -> Result<Self> {
        let parser = ListingParser::new(&profile)?;
        Ok(Self {
            profile,
            parser,
            fetcher,
        })
    }

    #[must_use]
    pub fn profile(&self) -> &SiteProfile {
        &self.profile
    }

    /// Fetch until the ready marker shows up, or `None` at the deadline.
    async fn fetch_ready_page(&self) -> Result<Option<String>> {
        let deadline = Instant::now() + self.profile.deadline;
        let mut attempts = 0u32;

        loop {
            attempts += 1;
            let html = self.fetcher.fetch_page(&self.profile.url).await?;
            if self.parser.is_ready(&html) {
                debug!(source = %self.profile.name, attempts, "Page ready");
                return Ok(Some(html));
            }

            if Instant::now() + self.profile.poll_interval > deadline {
                warn!(
                    source = %self.profile.name,
                    attempts,
                    deadline_ms = self.profile.deadline.as_millis() as u64,
                    "Timed out waiting for page to load"
                );
                return Ok(None);
            }
            tokio::time::sleep(self.profile.poll_interval).await;
        }
    }
}

#[async_trait]
impl ListingSource for HtmlListingSource {
    fn name(&self) -> &str {
        &self.profile.name
    }

    async fn fetch(&self) -> Result<Vec<Listing>> {
        let Some(html) = self.fetch_ready_page().await? else {
            return Ok(Vec::new());
        };

        let listings = self.parser.parse(&html)?;
        info!(source = %self.profile.name, count = listings.len(), "Parsed listings");
        Ok(listings)
    }
}
