//! Chat transport abstraction.

use async_trait::async_trait;

use crate::error::Result;

/// Sends a single text message to a chat.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send `text` to `chat_id`. Silent messages are delivered without a
    /// notification sound.
    async fn send(&self, chat_id: i64, text: &str, silent: bool) -> Result<()>;
}

#[cfg(feature = "telegram")]
mod bot {
    use async_trait::async_trait;
    use teloxide::prelude::*;

    use super::ChatTransport;
    use crate::error::{Result, SinkError};

    /// Telegram Bot API transport.
    pub struct BotTransport {
        bot: Bot,
    }

    impl BotTransport {
        /// Create a transport for the bot identified by `token`.
        #[must_use]
        pub fn new(token: &str) -> Self {
            Self {
                bot: Bot::new(token),
            }
        }
    }

    #[async_trait]
    impl ChatTransport for BotTransport {
        async fn send(&self, chat_id: i64, text: &str, silent: bool) -> Result<()> {
            self.bot
                .send_message(ChatId(chat_id), text)
                .disable_notification(silent)
                .await
                .map(|_| ())
                .map_err(|e| SinkError::Delivery(e.to_string()).into())
        }
    }
}

#[cfg(feature = "telegram")]
pub use bot::BotTransport;
