//! Operator alert port.
//!
//! Alerts are the operator-facing side channel: source health changes,
//! source failures and process heartbeats. They are distinct from listing
//! notifications, which go through [`ListingSink`](super::sink::ListingSink).

use async_trait::async_trait;

/// Events surfaced to the operator channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Alert {
    /// A source returned no listings (first time in a streak).
    SourceEmpty {
        /// Source name.
        source: String,
    },
    /// A source failed to fetch. Sent on every failure.
    SourceFailed {
        /// Source name.
        source: String,
        /// Full error detail, including the source chain.
        detail: String,
    },
    /// A previously unhealthy source produced listings again.
    SourceRestored {
        /// Source name.
        source: String,
    },
    /// Watch mode started.
    Started {
        /// Names of the configured sources.
        sources: Vec<String>,
        /// Seconds between cycles.
        interval_secs: u64,
    },
    /// Watch mode is shutting down.
    Stopped,
}

impl Alert {
    /// Whether the alert should be delivered without a notification sound.
    ///
    /// Empty-source notices and heartbeats are informational; failures and
    /// restorations are not.
    #[must_use]
    pub const fn is_silent(&self) -> bool {
        matches!(
            self,
            Self::SourceEmpty { .. } | Self::Started { .. } | Self::Stopped
        )
    }

    /// Source name the alert refers to, if any.
    #[must_use]
    pub fn source(&self) -> Option<&str> {
        match self {
            Self::SourceEmpty { source }
            | Self::SourceFailed { source, .. }
            | Self::SourceRestored { source } => Some(source),
            Self::Started { .. } | Self::Stopped => None,
        }
    }
}

/// Trait for operator alert handlers.
///
/// `alert` is fire-and-forget and must return quickly; implementations that
/// perform network I/O queue the alert and deliver it from a worker, and
/// override [`OperatorAlerts::drain`] so the caller can flush before exit.
#[async_trait]
pub trait OperatorAlerts: Send + Sync {
    /// Handle an alert.
    fn alert(&self, alert: Alert);

    /// Wait until queued alerts have been delivered.
    async fn drain(&self) {}
}

/// Registry of alert handlers (composite pattern).
///
/// Broadcasts every alert to all registered handlers.
pub struct AlertRegistry {
    handlers: Vec<Box<dyn OperatorAlerts>>,
}

impl AlertRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self { handlers: vec![] }
    }

    /// Register a handler.
    pub fn register(&mut self, handler: Box<dyn OperatorAlerts>) {
        self.handlers.push(handler);
    }

    /// Number of registered handlers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// Check if registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl Default for AlertRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl OperatorAlerts for AlertRegistry {
    fn alert(&self, alert: Alert) {
        for handler in &self.handlers {
            handler.alert(alert.clone());
        }
    }

    async fn drain(&self) {
        for handler in &self.handlers {
            handler.drain().await;
        }
    }
}

/// A no-op handler for when alerts are disabled.
pub struct NullAlerts;

impl OperatorAlerts for NullAlerts {
    fn alert(&self, _alert: Alert) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingAlerts {
        count: Arc<AtomicUsize>,
    }

    impl OperatorAlerts for CountingAlerts {
        fn alert(&self, _alert: Alert) {
            self.count.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn registry_broadcasts_to_all_handlers() {
        let count = Arc::new(AtomicUsize::new(0));
        let mut registry = AlertRegistry::new();
        registry.register(Box::new(CountingAlerts {
            count: count.clone(),
        }));
        registry.register(Box::new(CountingAlerts {
            count: count.clone(),
        }));

        registry.alert(Alert::Stopped);

        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn registry_len_and_is_empty() {
        let mut registry = AlertRegistry::new();
        assert!(registry.is_empty());

        registry.register(Box::new(NullAlerts));
        assert!(!registry.is_empty());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn empty_notices_and_heartbeats_are_silent() {
        assert!(Alert::SourceEmpty {
            source: "funda".into()
        }
        .is_silent());
        assert!(Alert::Stopped.is_silent());
        assert!(!Alert::SourceFailed {
            source: "funda".into(),
            detail: "boom".into()
        }
        .is_silent());
        assert!(!Alert::SourceRestored {
            source: "funda".into()
        }
        .is_silent());
    }

    #[test]
    fn source_accessor() {
        let alert = Alert::SourceRestored {
            source: "pararius".into(),
        };
        assert_eq!(alert.source(), Some("pararius"));
        assert_eq!(Alert::Stopped.source(), None);
    }
}
