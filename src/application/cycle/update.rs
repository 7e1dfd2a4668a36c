//! One fetch → deduplicate → dispatch pass.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use futures_util::FutureExt;
use tracing::{error, info};

use crate::application::dispatch::Dispatcher;
use crate::application::health::SourceHealthTracker;
use crate::domain::{Listing, SeenOutcome};
use crate::error::{report, Error, SourceError};
use crate::port::{ListingSource, SeenStore};

/// Counters for a single cycle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// Listings returned by all sources combined.
    pub fetched: usize,
    /// Listings recorded for the first time and dispatched.
    pub new: usize,
    /// Listings skipped because they were already recorded.
    pub already_seen: usize,
    /// Listings skipped because the store failed.
    pub store_failures: usize,
    /// Sources that failed this cycle.
    pub failed_sources: Vec<String>,
    /// Sources that returned nothing this cycle.
    pub empty_sources: Vec<String>,
}

/// The orchestration core.
///
/// Pulls from every source in order, gates each listing through the seen
/// store, and fans genuinely new listings out to the sinks. A failing
/// source, store write or sink only ever affects itself.
///
/// The store insert happens before dispatch: a crash between the two can
/// repeat a notification on the next run, but a recorded listing is never
/// silently left unnotified by a healthy run.
pub struct UpdateCycle {
    sources: Vec<Arc<dyn ListingSource>>,
    store: Arc<dyn SeenStore>,
    dispatcher: Dispatcher,
    health: SourceHealthTracker,
}

impl UpdateCycle {
    pub fn new(
        sources: Vec<Arc<dyn ListingSource>>,
        store: Arc<dyn SeenStore>,
        dispatcher: Dispatcher,
        health: SourceHealthTracker,
    ) -> Self {
        Self {
            sources,
            store,
            dispatcher,
            health,
        }
    }

    /// Names of the configured sources, in fetch order.
    #[must_use]
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name().to_string()).collect()
    }

    #[must_use]
    pub fn health(&self) -> &SourceHealthTracker {
        &self.health
    }

    #[must_use]
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }

    /// Run one full pass.
    pub async fn run(&mut self) -> CycleReport {
        let start = Instant::now();
        let mut summary = CycleReport::default();

        let listings = self.collect(&mut summary).await;
        summary.fetched = listings.len();

        for listing in &listings {
            match self.store.record_if_new(listing).await {
                Ok(SeenOutcome::AlreadySeen) => {
                    info!(link = %listing.link(), "Listing already seen");
                    summary.already_seen += 1;
                }
                Ok(SeenOutcome::New) => {
                    info!(link = %listing.link(), source = %listing.source(), "New listing");
                    self.dispatcher.dispatch(listing).await;
                    summary.new += 1;
                }
                Err(e) => {
                    error!(link = %listing.link(), error = %report(&e), "Failed to record listing, skipping");
                    summary.store_failures += 1;
                }
            }
        }

        info!(
            fetched = summary.fetched,
            new = summary.new,
            already_seen = summary.already_seen,
            store_failures = summary.store_failures,
            failed_sources = summary.failed_sources.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Update cycle complete"
        );
        summary
    }

    /// Fetch from every source, in order, isolating failures.
    ///
    /// A panic inside `fetch` is caught and treated as a fetch error.
    async fn collect(&mut self, summary: &mut CycleReport) -> Vec<Listing> {
        let mut listings = Vec::new();

        for source in &self.sources {
            let name = source.name();
            let result = AssertUnwindSafe(source.fetch())
                .catch_unwind()
                .await
                .unwrap_or_else(|payload| {
                    Err(Error::from(SourceError::Panicked(panic_message(payload.as_ref()))))
                });
            match result {
                Ok(batch) if batch.is_empty() => {
                    self.health.report_empty(name);
                    summary.empty_sources.push(name.to_string());
                }
                Ok(batch) => {
                    info!(source = name, count = batch.len(), "Fetched listings");
                    self.health.report_success(name);
                    listings.extend(batch);
                }
                Err(e) => {
                    self.health.report_error(name, &e);
                    summary.failed_sources.push(name.to_string());
                }
            }
        }

        listings
    }
}

/// Best-effort text of a panic payload.
fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}
