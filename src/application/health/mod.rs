//! Source health tracking.

mod tracker;

pub use tracker::SourceHealthTracker;
