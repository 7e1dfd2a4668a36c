//! SQLite seen-listing store.
//!
//! Provides durable deduplication for listings using SQLite and Diesel ORM.

use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use diesel::prelude::*;

use crate::adapter::outbound::sqlite::database::connection::DbPool;
use crate::adapter::outbound::sqlite::database::model::ProcessedListingRow;
use crate::adapter::outbound::sqlite::database::schema::processed_listings;
use crate::domain::{Listing, SeenOutcome, SeenRecord};
use crate::error::{Error, Result};
use crate::port::SeenStore;

/// SQLite-backed seen store.
///
/// Implements [`SeenStore`] with `INSERT OR IGNORE` on the `link` primary
/// key, so the first-seen check and the write are one atomic statement.
pub struct SqliteSeenStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteSeenStore {
    /// Create a new SQLite seen store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn to_row(listing: &Listing, first_seen: DateTime<Utc>) -> ProcessedListingRow {
        ProcessedListingRow {
            link: listing.link().to_string(),
            source: listing.source().to_string(),
            name: listing.name().to_string(),
            price: listing.price().to_string(),
            address: listing.address().to_string(),
            first_seen: first_seen.to_rfc3339_opts(SecondsFormat::Micros, true),
        }
    }

    fn from_row(row: ProcessedListingRow) -> Result<SeenRecord> {
        let first_seen = DateTime::parse_from_rfc3339(&row.first_seen)
            .map_err(|e| Error::Database(format!("invalid first_seen {:?}: {e}", row.first_seen)))?
            .with_timezone(&Utc);

        Ok(SeenRecord {
            link: row.link,
            source: row.source,
            name: row.name,
            price: row.price,
            address: row.address,
            first_seen,
        })
    }

    /// The most recently first-seen listings, newest first.
    pub fn recent(&self, limit: i64) -> Result<Vec<SeenRecord>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let rows: Vec<ProcessedListingRow> = processed_listings::table
            .order(processed_listings::first_seen.desc())
            .limit(limit)
            .select(ProcessedListingRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        rows.into_iter().map(Self::from_row).collect()
    }

    /// Look up a single record by link.
    pub fn get(&self, link: &str) -> Result<Option<SeenRecord>> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let row: Option<ProcessedListingRow> = processed_listings::table
            .find(link)
            .select(ProcessedListingRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        row.map(Self::from_row).transpose()
    }
}

#[async_trait]
impl SeenStore for SqliteSeenStore {
    async fn record_if_new(&self, listing: &Listing) -> Result<SeenOutcome> {
        let row = Self::to_row(listing, Utc::now());
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let inserted = diesel::insert_or_ignore_into(processed_listings::table)
            .values(&row)
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(if inserted == 0 {
            SeenOutcome::AlreadySeen
        } else {
            SeenOutcome::New
        })
    }

    async fn count(&self) -> Result<u64> {
        let mut conn = self
            .pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))?;

        let count: i64 = processed_listings::table
            .count()
            .get_result(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(count.max(0) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
    use crate::testkit::domain::listing;

    fn store() -> SqliteSeenStore {
        let pool = create_pool(":memory:").unwrap();
        run_migrations(&pool).unwrap();
        SqliteSeenStore::new(pool)
    }

    #[tokio::test]
    async fn first_insert_is_new_second_is_already_seen() {
        let store = store();

        assert_eq!(
            store.record_if_new(&listing("A")).await.unwrap(),
            SeenOutcome::New
        );
        assert_eq!(
            store.record_if_new(&listing("A")).await.unwrap(),
            SeenOutcome::AlreadySeen
        );
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_keeps_original_fields() {
        let store = store();
        let original = Listing::new("funda", "https://x.test/1", "Flat", "€1500", "Dam 1");
        let repriced = Listing::new("funda", "https://x.test/1", "Flat", "€1400", "Dam 1");

        store.record_if_new(&original).await.unwrap();
        store.record_if_new(&repriced).await.unwrap();

        let record = store.get("https://x.test/1").unwrap().unwrap();
        assert_eq!(record.price, "€1500");
        assert_eq!(record.source, "funda");
    }

    #[tokio::test]
    async fn recent_returns_newest_first() {
        let store = store();
        for name in ["A", "B", "C"] {
            store.record_if_new(&listing(name)).await.unwrap();
            tokio::time::sleep(std::time::Duration::from_millis(2)).await;
        }

        let names: Vec<String> = store
            .recent(2)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();

        assert_eq!(names, vec!["C", "B"]);
    }

    #[test]
    fn get_missing_link_is_none() {
        let store = store();
        assert!(store.get("https://x.test/missing").unwrap().is_none());
    }
}
