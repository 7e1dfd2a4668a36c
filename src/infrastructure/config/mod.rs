//! Infrastructure configuration modules.

pub mod browser;
pub mod dispatch;
pub mod logging;
pub mod schedule;
pub mod settings;
pub mod source;
pub mod telegram;
