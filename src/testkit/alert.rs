//! Recording operator alerts.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::port::{Alert, OperatorAlerts};

/// Thread-safe alert collector for assertions in tests.
#[derive(Clone, Default)]
pub struct RecordingAlerts {
    alerts: Arc<Mutex<Vec<Alert>>>,
}

impl RecordingAlerts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every alert received so far.
    pub fn alerts(&self) -> Vec<Alert> {
        self.alerts.lock().clone()
    }

    pub fn len(&self) -> usize {
        self.alerts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.lock().is_empty()
    }

    /// Number of alerts matching the predicate.
    pub fn count(&self, predicate: impl Fn(&Alert) -> bool) -> usize {
        self.alerts.lock().iter().filter(|a| predicate(a)).count()
    }
}

impl OperatorAlerts for RecordingAlerts {
    fn alert(&self, alert: Alert) {
        self.alerts.lock().push(alert);
    }
}
