//! Site-agnostic domain types.

mod listing;
mod seen;

pub use listing::Listing;
pub use seen::{SeenOutcome, SeenRecord};
