//! Test sinks covering every delivery outcome.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::Listing;
use crate::error::{Result, SinkError};
use crate::port::ListingSink;

/// Thread-safe listing collector for dispatch assertions.
#[derive(Clone)]
pub struct RecordingSink {
    name: String,
    listings: Arc<Mutex<Vec<Listing>>>,
}

impl RecordingSink {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            listings: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Listings received so far, in delivery order.
    pub fn listings(&self) -> Vec<Listing> {
        self.listings.lock().clone()
    }

    pub fn links(&self) -> Vec<String> {
        self.listings
            .lock()
            .iter()
            .map(|l| l.link().to_string())
            .collect()
    }

    pub fn names(&self) -> Vec<String> {
        self.listings
            .lock()
            .iter()
            .map(|l| l.name().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.listings.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.listings.lock().is_empty()
    }
}

#[async_trait]
impl ListingSink for RecordingSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, listing: &Listing) -> Result<()> {
        self.listings.lock().push(listing.clone());
        Ok(())
    }
}

/// A sink whose every delivery fails.
pub struct FailingSink {
    name: String,
}

impl FailingSink {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[async_trait]
impl ListingSink for FailingSink {
    fn name(&self) -> &str {
        &self.name
    }

    async fn handle(&self, _listing: &Listing) -> Result<()> {
        Err(SinkError::Delivery("scripted failure".to_string()).into())
    }
}

/// A sink that sleeps before recording, to exercise dispatch timeouts.
///
/// Only listings whose delivery ran to completion are recorded.
#[derive(Clone)]
pub struct HangingSink {
    delay: Duration,
    completed: Arc<Mutex<Vec<Listing>>>,
}

impl HangingSink {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            completed: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn completed(&self) -> usize {
        self.completed.lock().len()
    }
}

#[async_trait]
impl ListingSink for HangingSink {
    fn name(&self) -> &str {
        "hanging"
    }

    async fn handle(&self, listing: &Listing) -> Result<()> {
        tokio::time::sleep(self.delay).await;
        self.completed.lock().push(listing.clone());
        Ok(())
    }
}

/// A sink that panics inside `handle`.
pub struct PanickingSink;

#[async_trait]
impl ListingSink for PanickingSink {
    fn name(&self) -> &str {
        "panicking"
    }

    async fn handle(&self, listing: &Listing) -> Result<()> {
        panic!("sink exploded on {}", listing.link());
    }
}
