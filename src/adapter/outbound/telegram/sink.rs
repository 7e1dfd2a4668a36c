//! Telegram listing sink.

use std::sync::Arc;

use async_trait::async_trait;

use super::format::listing_message;
use super::outbox::{OutboundMessage, Outbox};
use crate::domain::Listing;
use crate::error::Result;
use crate::port::ListingSink;

/// Sends each new listing to the listings chat.
///
/// `handle` only queues; delivery happens on the outbox worker.
pub struct TelegramSink {
    outbox: Arc<Outbox>,
    chat_id: i64,
}

impl TelegramSink {
    #[must_use]
    pub fn new(outbox: Arc<Outbox>, chat_id: i64) -> Self {
        Self { outbox, chat_id }
    }
}

#[async_trait]
impl ListingSink for TelegramSink {
    fn name(&self) -> &str {
        "telegram"
    }

    async fn handle(&self, listing: &Listing) -> Result<()> {
        self.outbox.enqueue(OutboundMessage {
            chat_id: self.chat_id,
            text: listing_message(listing),
            silent: false,
        })
    }

    async fn drain(&self) {
        self.outbox.drain().await;
    }
}
