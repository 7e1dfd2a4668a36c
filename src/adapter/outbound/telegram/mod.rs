//! Telegram delivery for listings and operator alerts.
//!
//! Listing messages and operator alerts share one [`Outbox`]: an unbounded
//! queue drained by a single worker at a fixed pace, so the bot stays under
//! the chat API rate limit no matter how many listings a cycle produces.
//!
//! The Bot API client lives behind [`ChatTransport`]; [`BotTransport`] is the
//! teloxide implementation and requires the `telegram` feature.

mod alerts;
mod format;
mod outbox;
mod sink;
mod transport;

pub use alerts::TelegramAlerts;
pub use format::{alert_message, listing_message, truncate, MAX_MESSAGE_CHARS};
pub use outbox::{OutboundMessage, Outbox};
pub use sink::TelegramSink;
#[cfg(feature = "telegram")]
pub use transport::BotTransport;
pub use transport::ChatTransport;
