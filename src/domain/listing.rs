//! Rental listing value type.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// A single rental advertisement normalized from a listing site.
///
/// Listings are immutable once built. Identity is the `link`: two listings
/// with the same link compare equal even when the other fields differ,
/// which is what deduplication relies on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    source: String,
    link: String,
    name: String,
    price: String,
    address: String,
}

impl Listing {
    /// Create a new listing.
    pub fn new(
        source: impl Into<String>,
        link: impl Into<String>,
        name: impl Into<String>,
        price: impl Into<String>,
        address: impl Into<String>,
    ) -> Self {
        Self {
            source: source.into(),
            link: link.into(),
            name: name.into(),
            price: price.into(),
            address: address.into(),
        }
    }

    /// Name of the source that produced this listing.
    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Absolute link to the listing page. Unique key for deduplication.
    #[must_use]
    pub fn link(&self) -> &str {
        &self.link
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn price(&self) -> &str {
        &self.price
    }

    #[must_use]
    pub fn address(&self) -> &str {
        &self.address
    }
}

impl PartialEq for Listing {
    fn eq(&self, other: &Self) -> bool {
        self.link == other.link
    }
}

impl Eq for Listing {}

impl Hash for Listing {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.link.hash(state);
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.link)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn listing(link: &str, price: &str) -> Listing {
        Listing::new("funda", link, "Flat", price, "Main St 1")
    }

    #[test]
    fn equality_is_by_link_only() {
        let a = listing("https://example.test/a", "€1500");
        let b = listing("https://example.test/a", "€1750");
        let c = listing("https://example.test/c", "€1500");

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn hash_set_collapses_same_link() {
        let set: HashSet<_> = [
            listing("https://example.test/a", "€1500"),
            listing("https://example.test/a", "€1600"),
            listing("https://example.test/b", "€1500"),
        ]
        .into_iter()
        .collect();

        assert_eq!(set.len(), 2);
    }

    #[test]
    fn accessors_return_fields() {
        let l = Listing::new("pararius", "https://x.test/1", "Loft", "€1.900", "Canal 2");
        assert_eq!(l.source(), "pararius");
        assert_eq!(l.link(), "https://x.test/1");
        assert_eq!(l.name(), "Loft");
        assert_eq!(l.price(), "€1.900");
        assert_eq!(l.address(), "Canal 2");
        assert_eq!(l.to_string(), "Loft (https://x.test/1)");
    }
}
