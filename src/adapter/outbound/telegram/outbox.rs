//! Paced message queue with a single delivery worker.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Notify};
use tracing::{debug, error, info, warn};

use super::transport::ChatTransport;
use crate::error::{report, Result, SinkError};

/// A message waiting for delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutboundMessage {
    pub chat_id: i64,
    pub text: String,
    pub silent: bool,
}

/// Unbounded outbound queue drained by one background worker.
///
/// [`Outbox::enqueue`] never blocks. The worker sends one message, then
/// waits `pacing` before taking the next. [`Outbox::drain`] waits until
/// every enqueued message has been attempted, up to `drain_timeout`.
pub struct Outbox {
    sender: mpsc::UnboundedSender<OutboundMessage>,
    pending: Arc<AtomicUsize>,
    idle: Arc<Notify>,
    drain_timeout: Duration,
}

impl Outbox {
    /// Create the queue and spawn its worker on the current runtime.
    #[must_use]
    pub fn spawn(
        transport: Arc<dyn ChatTransport>,
        pacing: Duration,
        drain_timeout: Duration,
    ) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        let pending = Arc::new(AtomicUsize::new(0));
        let idle = Arc::new(Notify::new());

        tokio::spawn(outbox_worker(
            transport,
            receiver,
            Arc::clone(&pending),
            Arc::clone(&idle),
            pacing,
        ));

        Self {
            sender,
            pending,
            idle,
            drain_timeout,
        }
    }

    /// Queue a message for delivery.
    ///
    /// # Errors
    /// Returns [`SinkError::QueueClosed`] if the worker has stopped.
    pub fn enqueue(&self, message: OutboundMessage) -> Result<()> {
        self.pending.fetch_add(1, Ordering::SeqCst);
        if self.sender.send(message).is_err() {
            self.pending.fetch_sub(1, Ordering::SeqCst);
            return Err(SinkError::QueueClosed.into());
        }
        Ok(())
    }

    /// Messages enqueued but not yet attempted.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.pending.load(Ordering::SeqCst)
    }

    /// Wait until the queue is empty or the drain deadline passes.
    ///
    /// Returns `true` if the queue emptied in time.
    pub async fn drain(&self) -> bool {
        let deadline = tokio::time::Instant::now() + self.drain_timeout;

        loop {
            // Registered before the check so a wakeup in between is not lost.
            let notified = self.idle.notified();
            let remaining = self.pending();
            if remaining == 0 {
                return true;
            }

            debug!(remaining, "Waiting for Telegram outbox to drain");
            if tokio::time::timeout_at(deadline, notified).await.is_err() {
                warn!(
                    remaining = self.pending(),
                    timeout_ms = self.drain_timeout.as_millis() as u64,
                    "Telegram outbox drain timed out, dropping queued messages"
                );
                return false;
            }
        }
    }
}

/// Background worker that sends queued messages one at a time.
async fn outbox_worker(
    transport: Arc<dyn ChatTransport>,
    mut receiver: mpsc::UnboundedReceiver<OutboundMessage>,
    pending: Arc<AtomicUsize>,
    idle: Arc<Notify>,
    pacing: Duration,
) {
    info!(pacing_ms = pacing.as_millis() as u64, "Telegram outbox started");

    while let Some(message) = receiver.recv().await {
        if let Err(e) = transport
            .send(message.chat_id, &message.text, message.silent)
            .await
        {
            error!(chat_id = message.chat_id, error = %report(&e), "Failed to send Telegram message");
        }

        if pending.fetch_sub(1, Ordering::SeqCst) == 1 {
            idle.notify_waiters();
        }

        if !pacing.is_zero() {
            tokio::time::sleep(pacing).await;
        }
    }

    warn!("Telegram outbox worker shutting down");
}
