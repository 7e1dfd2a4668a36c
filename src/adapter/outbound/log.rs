//! Logging sink and alert handler.
//!
//! Always registered, so every listing and alert shows up in the logs even
//! when no chat or browser delivery is configured.

use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::Listing;
use crate::error::Result;
use crate::port::{Alert, ListingSink, OperatorAlerts};

/// Listing sink that writes each new listing to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

#[async_trait]
impl ListingSink for LogSink {
    fn name(&self) -> &str {
        "log"
    }

    async fn handle(&self, listing: &Listing) -> Result<()> {
        info!(
            source = %listing.source(),
            name = %listing.name(),
            address = %listing.address(),
            price = %listing.price(),
            link = %listing.link(),
            "New listing"
        );
        Ok(())
    }
}

/// Alert handler that writes alerts to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAlerts;

impl OperatorAlerts for LogAlerts {
    fn alert(&self, alert: Alert) {
        match alert {
            Alert::SourceEmpty { source } => {
                warn!(source = %source, "Alert: source returned empty result");
            }
            Alert::SourceFailed { source, detail } => {
                warn!(source = %source, detail = %detail, "Alert: source failed");
            }
            Alert::SourceRestored { source } => {
                info!(source = %source, "Alert: source restored");
            }
            Alert::Started {
                sources,
                interval_secs,
            } => {
                info!(sources = %sources.join(","), interval_secs, "Alert: watcher started");
            }
            Alert::Stopped => {
                info!("Alert: watcher stopped");
            }
        }
    }
}
