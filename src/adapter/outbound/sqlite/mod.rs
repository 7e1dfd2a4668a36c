//! SQLite persistence adapters.
//!
//! Provides the SQLite-backed seen store using Diesel ORM.

pub mod database;
pub mod store;

pub use database::connection::{create_pool, run_migrations, DbPool};
pub use store::SqliteSeenStore;
