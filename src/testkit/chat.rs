//! Recording chat transport.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::adapter::outbound::telegram::{ChatTransport, OutboundMessage};
use crate::error::{Result, SinkError};

/// Captures every message sent through it instead of calling the Bot API.
#[derive(Clone, Default)]
pub struct RecordingTransport {
    sent: Arc<Mutex<Vec<OutboundMessage>>>,
    failing: Arc<Mutex<HashSet<String>>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject any message whose text equals `text`.
    pub fn fail_on(&self, text: &str) {
        self.failing.lock().insert(text.to_string());
    }

    /// Successfully sent messages, in send order.
    pub fn messages(&self) -> Vec<OutboundMessage> {
        self.sent.lock().clone()
    }

    pub fn texts(&self) -> Vec<String> {
        self.sent.lock().iter().map(|m| m.text.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sent.lock().is_empty()
    }
}

#[async_trait]
impl ChatTransport for RecordingTransport {
    async fn send(&self, chat_id: i64, text: &str, silent: bool) -> Result<()> {
        if self.failing.lock().contains(text) {
            return Err(SinkError::Delivery(format!("rejected {text:?}")).into());
        }
        self.sent.lock().push(OutboundMessage {
            chat_id,
            text: text.to_string(),
            silent,
        });
        Ok(())
    }
}
