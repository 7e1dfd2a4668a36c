//! The fetch → deduplicate → dispatch cycle.

mod update;

pub use update::{CycleReport, UpdateCycle};
