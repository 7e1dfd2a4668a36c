//! Run-once and watch-mode lifecycle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use crate::application::cycle::{CycleReport, UpdateCycle};
use crate::port::{Alert, OperatorAlerts};

/// Drives an [`UpdateCycle`] once or on a fixed schedule.
///
/// Both modes end by draining queued sink deliveries and alerts, so nothing
/// accepted during the run is lost on a clean exit.
pub struct Watcher {
    cycle: UpdateCycle,
    alerts: Arc<dyn OperatorAlerts>,
    interval: Duration,
}

impl Watcher {
    pub fn new(cycle: UpdateCycle, alerts: Arc<dyn OperatorAlerts>, interval: Duration) -> Self {
        Self {
            cycle,
            alerts,
            interval,
        }
    }

    #[must_use]
    pub fn cycle(&self) -> &UpdateCycle {
        &self.cycle
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Run a single cycle, then drain.
    pub async fn run_once(&mut self) -> CycleReport {
        let report = self.cycle.run().await;
        self.drain().await;
        report
    }

    /// Run cycles every `interval` until `shutdown` flips to `true` or its
    /// sender is dropped. Returns the number of completed cycles.
    ///
    /// The first cycle starts immediately. A cycle always runs to completion
    /// before shutdown is observed, and a cycle that overruns the interval
    /// delays the next tick instead of triggering a burst.
    pub async fn run_watch(&mut self, mut shutdown: watch::Receiver<bool>) -> u64 {
        self.alerts.alert(Alert::Started {
            sources: self.cycle.source_names(),
            interval_secs: self.interval.as_secs(),
        });
        info!(
            interval_secs = self.interval.as_secs(),
            sources = self.cycle.source_names().len(),
            "Watching for new listings"
        );

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut cycles = 0u64;

        if !*shutdown.borrow() {
            loop {
                tokio::select! {
                    biased;
                    result = shutdown.changed() => {
                        match result {
                            Ok(()) if *shutdown.borrow() => {
                                info!("Shutdown signal received");
                                break;
                            }
                            Ok(()) => {}
                            Err(_) => {
                                info!("Shutdown channel closed");
                                break;
                            }
                        }
                    }
                    _ = ticker.tick() => {
                        let report = self.cycle.run().await;
                        cycles += 1;
                        if !report.failed_sources.is_empty() {
                            warn!(cycle = cycles, failed = ?report.failed_sources, "Cycle finished with failed sources");
                        }
                    }
                }
            }
        }

        self.alerts.alert(Alert::Stopped);
        self.drain().await;
        info!(cycles, "Watcher stopped");
        cycles
    }

    /// Flush queued sink deliveries, then queued alerts.
    pub async fn drain(&self) {
        self.cycle.dispatcher().drain().await;
        self.alerts.drain().await;
    }
}
