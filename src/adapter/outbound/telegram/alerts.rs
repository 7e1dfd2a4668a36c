//! Telegram operator alerts.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use super::format::alert_message;
use super::outbox::{OutboundMessage, Outbox};
use crate::error::report;
use crate::port::{Alert, OperatorAlerts};

/// Sends operator alerts to the operator chat.
///
/// Empty-source notices and heartbeats go out silently.
pub struct TelegramAlerts {
    outbox: Arc<Outbox>,
    chat_id: i64,
}

impl TelegramAlerts {
    #[must_use]
    pub fn new(outbox: Arc<Outbox>, chat_id: i64) -> Self {
        Self { outbox, chat_id }
    }
}

#[async_trait]
impl OperatorAlerts for TelegramAlerts {
    fn alert(&self, alert: Alert) {
        let message = OutboundMessage {
            chat_id: self.chat_id,
            text: alert_message(&alert),
            silent: alert.is_silent(),
        };
        if let Err(e) = self.outbox.enqueue(message) {
            warn!(error = %report(&e), "Dropping operator alert");
        }
    }

    async fn drain(&self) {
        self.outbox.drain().await;
    }
}
