//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::processed_listings;

/// Database row for a processed listing.
#[derive(Queryable, Selectable, Insertable, Debug, Clone)]
#[diesel(table_name = processed_listings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProcessedListingRow {
    pub link: String,
    pub source: String,
    pub name: String,
    pub price: String,
    pub address: String,
    pub first_seen: String,
}
