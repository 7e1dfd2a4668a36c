//! Listing fan-out to sinks.

mod dispatcher;

pub use dispatcher::{DispatchMode, DispatchReport, Dispatcher};
