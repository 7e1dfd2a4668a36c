//! Builders for domain primitives used across tests.

use crate::domain::Listing;

/// Base URL for generated listing links.
pub const LINK_BASE: &str = "https://listings.test/";

/// Create a listing whose name is `name` and whose link is derived from it.
pub fn listing(name: &str) -> Listing {
    listing_from("test", name)
}

/// Create a listing attributed to `source`.
pub fn listing_from(source: &str, name: &str) -> Listing {
    Listing::new(
        source,
        link(name),
        name,
        "€ 1.750 /month",
        format!("{name}straat 1, Amsterdam"),
    )
}

/// The link [`listing`] generates for `name`.
pub fn link(name: &str) -> String {
    format!("{LINK_BASE}{name}")
}

/// Generate `n` listings named `L0`, `L1`, ..., `L{n-1}`.
pub fn make_listings(n: usize) -> Vec<Listing> {
    (0..n).map(|i| listing(&format!("L{i}"))).collect()
}
