//! Per-source health tracking with alert suppression.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{error, info, warn};

use crate::error::{report, Error};
use crate::port::{Alert, OperatorAlerts};

/// Tracks which sources are currently unhealthy and decides which
/// transitions reach the operator.
///
/// Empty results alert only on the healthy → unhealthy transition, so a
/// quiet site does not page the operator every cycle. Errors alert every
/// time with the full error chain. A source that produces listings again
/// after being unhealthy triggers a single "restored" alert.
///
/// The unhealthy set is owned and mutated through `&mut self`; the update
/// cycle is its only user.
pub struct SourceHealthTracker {
    unhealthy: HashSet<String>,
    alerts: Arc<dyn OperatorAlerts>,
}

impl SourceHealthTracker {
    /// Create a tracker where every source starts healthy.
    pub fn new(alerts: Arc<dyn OperatorAlerts>) -> Self {
        Self {
            unhealthy: HashSet::new(),
            alerts,
        }
    }

    /// A source returned no listings.
    pub fn report_empty(&mut self, source: &str) {
        if self.unhealthy.insert(source.to_string()) {
            warn!(source, "Source returned no listings");
            self.alerts.alert(Alert::SourceEmpty {
                source: source.to_string(),
            });
        } else {
            info!(source, "Source still returning no listings");
        }
    }

    /// A source failed. Always alerted.
    pub fn report_error(&mut self, source: &str, err: &Error) {
        let detail = report(err);
        error!(source, error = %detail, "Source fetch failed");
        self.unhealthy.insert(source.to_string());
        self.alerts.alert(Alert::SourceFailed {
            source: source.to_string(),
            detail,
        });
    }

    /// A source returned a non-empty result.
    pub fn report_success(&mut self, source: &str) {
        if self.unhealthy.remove(source) {
            info!(source, "Source restored");
            self.alerts.alert(Alert::SourceRestored {
                source: source.to_string(),
            });
        }
    }

    /// Whether the source is currently marked unhealthy.
    #[must_use]
    pub fn is_unhealthy(&self, source: &str) -> bool {
        self.unhealthy.contains(source)
    }

    /// Names of all currently unhealthy sources, sorted.
    #[must_use]
    pub fn unhealthy_sources(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.unhealthy.iter().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
