//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`source`] - Scripted [`ListingSource`](crate::port::ListingSource)
//!   with a queue of canned responses, and a source that panics.
//! - [`sink`] - Recording, failing, hanging and panicking sinks.
//! - [`store`] - In-memory [`SeenStore`](crate::port::SeenStore) with
//!   injectable failures.
//! - [`alert`] - Recording operator alerts.
//! - [`chat`] - Recording chat transport for the Telegram outbox.
//! - [`domain`] - Builders for listings.
//! - [`config`] - Canonical test configurations.

pub mod alert;
pub mod chat;
pub mod config;
pub mod domain;
pub mod sink;
pub mod source;
pub mod store;
