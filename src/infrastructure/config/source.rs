//! Listing source configuration and built-in site profiles.

use std::time::Duration;

use serde::Deserialize;

use crate::adapter::outbound::site::{SiteProfile, SiteSelectors};

/// CSS selectors for the four listing columns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SelectorConfig {
    pub title: String,
    pub address: String,
    pub link: String,
    pub price: String,
}

/// One `[[sources]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SourceConfig {
    /// Stable name, used in logs, alerts and stored records.
    pub name: String,
    /// Search results URL.
    pub url: String,
    /// Base for resolving relative listing links.
    pub base_url: String,
    /// Selector that must be present before the page counts as loaded.
    #[serde(default)]
    pub ready_marker: Option<String>,
    /// Seconds to wait for the ready marker (default: 10).
    #[serde(default = "default_deadline_secs")]
    pub deadline_secs: u64,
    /// Milliseconds between ready-marker polls (default: 300).
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    /// HTTP request timeout in seconds (default: 30).
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    pub selectors: SelectorConfig,
}

const fn default_deadline_secs() -> u64 {
    10
}

const fn default_poll_interval_ms() -> u64 {
    300
}

const fn default_request_timeout_secs() -> u64 {
    30
}

impl SourceConfig {
    /// Funda rentals in Amsterdam, €1500–2000, newest first.
    #[must_use]
    pub fn funda() -> Self {
        Self {
            name: "funda".into(),
            url: "https://www.funda.nl/huur/amsterdam/1500-2000/sorteer-datum-af/".into(),
            base_url: "https://www.funda.nl".into(),
            ready_marker: None,
            deadline_secs: default_deadline_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            selectors: SelectorConfig {
                title: ".search-result__header-title".into(),
                address: ".search-result__header-subtitle".into(),
                link: ".search-result__header-title-col a:first-child".into(),
                price: ".search-result-price".into(),
            },
        }
    }

    /// Pararius rentals in Amsterdam, €1500–2000.
    #[must_use]
    pub fn pararius() -> Self {
        Self {
            name: "pararius".into(),
            url: "https://www.pararius.nl/huurwoningen/amsterdam/1500-2000".into(),
            base_url: "https://www.pararius.nl".into(),
            ready_marker: Some(".search-list-sorting".into()),
            deadline_secs: default_deadline_secs(),
            poll_interval_ms: default_poll_interval_ms(),
            request_timeout_secs: default_request_timeout_secs(),
            selectors: SelectorConfig {
                title: ".listing-search-item__title".into(),
                address: ".listing-search-item__sub-title".into(),
                link: ".listing-search-item__link--title".into(),
                price: ".listing-search-item__price".into(),
            },
        }
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Convert into the scraper's site profile.
    #[must_use]
    pub fn to_profile(&self) -> SiteProfile {
        SiteProfile {
            name: self.name.clone(),
            url: self.url.clone(),
            base_url: self.base_url.clone(),
            ready_marker: self.ready_marker.clone(),
            deadline: Duration::from_secs(self.deadline_secs),
            poll_interval: Duration::from_millis(self.poll_interval_ms),
            selectors: SiteSelectors {
                title: self.selectors.title.clone(),
                address: self.selectors.address.clone(),
                link: self.selectors.link.clone(),
                price: self.selectors.price.clone(),
            },
        }
    }
}

/// Sources used when the config file has no `[[sources]]`.
#[must_use]
pub fn builtin_sources() -> Vec<SourceConfig> {
    vec![SourceConfig::pararius(), SourceConfig::funda()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::site::ListingParser;

    #[test]
    fn builtin_profiles_compile() {
        for source in builtin_sources() {
            assert!(
                ListingParser::new(&source.to_profile()).is_ok(),
                "{} profile failed to compile",
                source.name
            );
        }
    }

    #[test]
    fn pararius_waits_for_sorting_bar() {
        let profile = SourceConfig::pararius().to_profile();

        assert_eq!(profile.ready_marker.as_deref(), Some(".search-list-sorting"));
        assert_eq!(profile.deadline, Duration::from_secs(10));
        assert_eq!(profile.poll_interval, Duration::from_millis(300));
    }

    #[test]
    fn funda_has_no_ready_marker() {
        assert!(SourceConfig::funda().ready_marker.is_none());
    }
}
