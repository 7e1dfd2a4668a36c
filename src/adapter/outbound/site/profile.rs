//! Site profiles.

use std::time::Duration;

/// CSS selectors for the four listing columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteSelectors {
    pub title: String,
    pub address: String,
    pub link: String,
    pub price: String,
}

/// Everything needed to scrape one search-results page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteProfile {
    /// Source name, used as the listing's `source` and health identity.
    pub name: String,
    /// Search results URL.
    pub url: String,
    /// Base that relative listing links are resolved against.
    pub base_url: String,
    /// Selector that must match before the page is considered loaded.
    pub ready_marker: Option<String>,
    /// How long to wait for the ready marker before giving up.
    pub deadline: Duration,
    /// Delay between ready-marker polls.
    pub poll_interval: Duration,
    pub selectors: SiteSelectors,
}
