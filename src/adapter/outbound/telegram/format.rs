//! Message formatting for Telegram.
//!
//! Messages are plain text. Listing names and addresses come straight from
//! scraped pages, so no markup is applied that they could break.

use crate::domain::Listing;
use crate::port::Alert;

/// Telegram rejects messages longer than this.
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Format a listing as four lines: name, address, price, link.
#[must_use]
pub fn listing_message(listing: &Listing) -> String {
    format!(
        "{}\n{}\n{}\n{}",
        listing.name(),
        listing.address(),
        listing.price(),
        listing.link()
    )
}

/// Format an operator alert.
#[must_use]
pub fn alert_message(alert: &Alert) -> String {
    let text = match alert {
        Alert::SourceEmpty { source } => format!("{source} returned empty result"),
        Alert::SourceFailed { source, detail } => format!("{source} failed\n\n{detail}"),
        Alert::SourceRestored { source } => format!("{source} restored"),
        Alert::Started {
            sources,
            interval_secs,
        } => format!(
            "rentwatch started\nsources: {}\ninterval: {interval_secs}s",
            sources.join(", ")
        ),
        Alert::Stopped => "rentwatch stopped".to_string(),
    };
    truncate(&text, MAX_MESSAGE_CHARS - 3)
}

/// Truncate a string with ellipsis (Unicode-safe).
#[must_use]
pub fn truncate(s: &str, max_chars: usize) -> String {
    let char_count = s.chars().count();
    if char_count > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn listing_message_has_four_lines() {
        let listing = Listing::new(
            "funda",
            "https://www.funda.nl/huur/amsterdam/appartement-1/",
            "Appartement Dam 1",
            "€ 1.750 /maand",
            "1012 JS Amsterdam",
        );

        assert_eq!(
            listing_message(&listing),
            "Appartement Dam 1\n1012 JS Amsterdam\n€ 1.750 /maand\nhttps://www.funda.nl/huur/amsterdam/appartement-1/"
        );
    }

    #[test]
    fn failure_alert_carries_detail() {
        let text = alert_message(&Alert::SourceFailed {
            source: "pararius".into(),
            detail: "request failed\ncaused by: timed out".into(),
        });

        assert!(text.starts_with("pararius failed"));
        assert!(text.contains("caused by: timed out"));
    }

    #[test]
    fn started_alert_lists_sources() {
        let text = alert_message(&Alert::Started {
            sources: vec!["funda".into(), "pararius".into()],
            interval_secs: 600,
        });

        assert!(text.contains("funda, pararius"));
        assert!(text.contains("600s"));
    }

    #[test]
    fn oversized_alert_is_truncated() {
        let text = alert_message(&Alert::SourceFailed {
            source: "funda".into(),
            detail: "x".repeat(10_000),
        });

        assert_eq!(text.chars().count(), MAX_MESSAGE_CHARS);
        assert!(text.ends_with("..."));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 10), "hello");
        assert_eq!(truncate("hello world", 5), "hello...");
        assert_eq!(truncate("ab", 2), "ab");
    }

    #[test]
    fn test_truncate_unicode() {
        assert_eq!(truncate("Straße €", 6), "Straße...");
        assert_eq!(truncate("café", 4), "café");
    }
}
