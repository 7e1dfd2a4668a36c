//! In-memory seen store.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::Mutex;

use crate::domain::{Listing, SeenOutcome, SeenRecord};
use crate::error::{Error, Result};
use crate::port::SeenStore;

#[derive(Default)]
struct Inner {
    records: HashMap<String, SeenRecord>,
    order: Vec<String>,
    failing: HashSet<String>,
}

/// Seen store backed by a `HashMap`, shared between clones.
///
/// Links registered with [`MemorySeenStore::fail_on`] return a database
/// error instead of being recorded.
#[derive(Clone, Default)]
pub struct MemorySeenStore {
    inner: Arc<Mutex<Inner>>,
}

impl MemorySeenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate the store with the given links.
    pub fn with_links<'a>(links: impl IntoIterator<Item = &'a str>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.inner.lock();
            for link in links {
                let record = SeenRecord {
                    link: link.to_string(),
                    source: "seed".to_string(),
                    name: String::new(),
                    price: String::new(),
                    address: String::new(),
                    first_seen: Utc::now(),
                };
                inner.order.push(link.to_string());
                inner.records.insert(link.to_string(), record);
            }
        }
        store
    }

    /// Make `record_if_new` fail for this link.
    pub fn fail_on(&self, link: &str) {
        self.inner.lock().failing.insert(link.to_string());
    }

    pub fn contains(&self, link: &str) -> bool {
        self.inner.lock().records.contains_key(link)
    }

    /// Recorded links in insertion order.
    pub fn links(&self) -> Vec<String> {
        self.inner.lock().order.clone()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().records.is_empty()
    }
}

#[async_trait]
impl SeenStore for MemorySeenStore {
    async fn record_if_new(&self, listing: &Listing) -> Result<SeenOutcome> {
        let mut inner = self.inner.lock();
        if inner.failing.contains(listing.link()) {
            return Err(Error::Database(format!(
                "scripted failure for {}",
                listing.link()
            )));
        }
        if inner.records.contains_key(listing.link()) {
            return Ok(SeenOutcome::AlreadySeen);
        }
        inner.order.push(listing.link().to_string());
        inner.records.insert(
            listing.link().to_string(),
            SeenRecord::from_listing(listing, Utc::now()),
        );
        Ok(SeenOutcome::New)
    }

    async fn count(&self) -> Result<u64> {
        Ok(self.inner.lock().records.len() as u64)
    }
}
