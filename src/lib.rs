//! rentwatch - watches rental listing sites and notifies about new listings.
//!
//! Each update cycle fetches listings from every configured site, records
//! each one in a persistent seen store, and dispatches the listings seen for
//! the first time to the configured sinks (log, Telegram, browser). Source
//! health transitions are reported to an operator chat.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Listings and seen-store records
//! - [`port`] - Traits for sources, the seen store, sinks and operator alerts
//! - [`application`] - The update cycle, sink dispatch and source health tracking
//! - [`adapter`] - HTML sources, SQLite store, Telegram/browser/log sinks, CLI
//! - [`infrastructure`] - Configuration, credentials, wiring and the run loop
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `telegram` (default) - Telegram delivery via the Bot API
//! - `browser` (default) - Open new listings in the default browser
//! - `testkit` - Test doubles for integration tests
//!
//! # Example
//!
//! ```no_run
//! use rentwatch::infrastructure::config::settings::Config;
//! use rentwatch::infrastructure::orchestration::run_once;
//!
//! # async fn demo() -> rentwatch::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let report = run_once(&config).await?;
//! println!("{} new listings", report.new);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
