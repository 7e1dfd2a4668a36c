//! Runtime orchestration.
//!
//! Lifecycle management for run-once and watch mode.

pub mod runtime;
mod watcher;

pub use runtime::{run_once, run_watch, shutdown_on_ctrl_c};
pub use watcher::Watcher;
