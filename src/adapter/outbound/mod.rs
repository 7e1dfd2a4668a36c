//! Outbound adapters (driven side).

#[cfg(feature = "browser")]
pub mod browser;
pub mod log;
pub mod site;
pub mod sqlite;
pub mod telegram;
