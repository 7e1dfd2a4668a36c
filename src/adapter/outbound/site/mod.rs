//! HTML listing sources.
//!
//! A source is a [`SiteProfile`]: one search-results URL plus four CSS
//! selectors (title, address, link, price). Pages are fetched as static HTML
//! and the four selector columns are zipped into listings in page order.

mod fetcher;
mod parser;
mod profile;
mod source;

pub use fetcher::{HttpPageFetcher, PageFetcher};
pub use parser::ListingParser;
pub use profile::{SiteProfile, SiteSelectors};
pub use source::HtmlListingSource;
