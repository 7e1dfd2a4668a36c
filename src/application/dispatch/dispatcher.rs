//! Fan-out of new listings to every configured sink.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use futures_util::future::join_all;
use futures_util::FutureExt;
use tracing::{debug, error, info, warn};

use crate::domain::Listing;
use crate::error::report;
use crate::port::ListingSink;

/// How sinks are invoked for one listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchMode {
    /// All sinks run as concurrent tasks, each awaited for at most `timeout`.
    Concurrent {
        /// Per-sink deadline.
        timeout: Duration,
    },
    /// Sinks run one after another, each allowed to block.
    Sequential,
}

impl Default for DispatchMode {
    fn default() -> Self {
        Self::Concurrent {
            timeout: Duration::from_secs(5),
        }
    }
}

/// Per-listing delivery outcome, by sink name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DispatchReport {
    pub delivered: Vec<String>,
    pub failed: Vec<String>,
    pub timed_out: Vec<String>,
}

impl DispatchReport {
    /// True when every sink accepted the listing.
    #[must_use]
    pub fn all_delivered(&self) -> bool {
        self.failed.is_empty() && self.timed_out.is_empty()
    }
}

enum SinkOutcome {
    Delivered,
    Failed,
    TimedOut,
}

/// Delivers listings to sinks with per-sink failure isolation.
///
/// Nothing a sink does (error, panic, hang) propagates out of
/// [`Dispatcher::dispatch`].
pub struct Dispatcher {
    sinks: Vec<Arc<dyn ListingSink>>,
    mode: DispatchMode,
}

impl Dispatcher {
    /// Create a dispatcher over the given sinks.
    pub fn new(sinks: Vec<Arc<dyn ListingSink>>, mode: DispatchMode) -> Self {
        Self { sinks, mode }
    }

    #[must_use]
    pub fn mode(&self) -> DispatchMode {
        self.mode
    }

    /// Number of configured sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Deliver one listing to every sink.
    pub async fn dispatch(&self, listing: &Listing) -> DispatchReport {
        let outcomes = match self.mode {
            DispatchMode::Concurrent { timeout } => self.dispatch_concurrent(listing, timeout).await,
            DispatchMode::Sequential => self.dispatch_sequential(listing).await,
        };

        let mut report = DispatchReport::default();
        for (name, outcome) in outcomes {
            match outcome {
                SinkOutcome::Delivered => report.delivered.push(name),
                SinkOutcome::Failed => report.failed.push(name),
                SinkOutcome::TimedOut => report.timed_out.push(name),
            }
        }

        info!(
            link = %listing.link(),
            delivered = report.delivered.len(),
            failed = report.failed.len(),
            timed_out = report.timed_out.len(),
            "Listing dispatched"
        );
        report
    }

    /// Wait for every queueing sink to flush.
    pub async fn drain(&self) {
        for sink in &self.sinks {
            debug!(sink = sink.name(), "Draining sink");
            sink.drain().await;
        }
    }

    async fn dispatch_concurrent(
        &self,
        listing: &Listing,
        timeout: Duration,
    ) -> Vec<(String, SinkOutcome)> {
        // One task per sink, scoped to this listing.
        let tasks = self.sinks.iter().map(|sink| {
            let name = sink.name().to_string();
            let task_sink = Arc::clone(sink);
            let task_listing = listing.clone();
            let mut handle =
                tokio::spawn(async move { task_sink.handle(&task_listing).await });
            let link = listing.link().to_string();

            async move {
                let outcome = match tokio::time::timeout(timeout, &mut handle).await {
                    Ok(Ok(Ok(()))) => SinkOutcome::Delivered,
                    Ok(Ok(Err(e))) => {
                        warn!(sink = %name, link = %link, error = %report(&e), "Sink delivery failed");
                        SinkOutcome::Failed
                    }
                    Ok(Err(join_error)) => {
                        error!(sink = %name, link = %link, error = %join_error, "Sink task panicked");
                        SinkOutcome::Failed
                    }
                    Err(_) => {
                        warn!(
                            sink = %name,
                            link = %link,
                            timeout_ms = timeout.as_millis() as u64,
                            "Sink timed out, abandoning delivery"
                        );
                        handle.abort();
                        SinkOutcome::TimedOut
                    }
                };
                (name, outcome)
            }
        });

        join_all(tasks).await
    }

    async fn dispatch_sequential(&self, listing: &Listing) -> Vec<(String, SinkOutcome)> {
        let mut outcomes = Vec::with_capacity(self.sinks.len());
        for sink in &self.sinks {
            let name = sink.name().to_string();
            let outcome = match AssertUnwindSafe(sink.handle(listing)).catch_unwind().await {
                Ok(Ok(())) => SinkOutcome::Delivered,
                Ok(Err(e)) => {
                    warn!(sink = %name, link = %listing.link(), error = %report(&e), "Sink delivery failed");
                    SinkOutcome::Failed
                }
                Err(_) => {
                    error!(sink = %name, link = %listing.link(), "Sink panicked");
                    SinkOutcome::Failed
                }
            };
            outcomes.push((name, outcome));
        }
        outcomes
    }
}
