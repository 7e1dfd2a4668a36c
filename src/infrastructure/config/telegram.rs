//! Telegram delivery configuration.

use std::time::Duration;

use serde::Deserialize;

/// Telegram delivery configuration.
///
/// The bot token never lives in the config file; see
/// [`credentials`](crate::infrastructure::credentials).
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramAppConfig {
    /// Enable Telegram delivery.
    #[serde(default)]
    pub enabled: bool,
    /// Chat that receives listing messages.
    #[serde(default)]
    pub chat_id: Option<i64>,
    /// Chat that receives alerts and heartbeats.
    #[serde(default)]
    pub operator_chat_id: Option<i64>,
    /// Delay between consecutive messages (default: 1000).
    #[serde(default = "default_pacing_ms")]
    pub pacing_ms: u64,
    /// Longest wait for the outbox to empty on exit (default: 30).
    #[serde(default = "default_drain_timeout_secs")]
    pub drain_timeout_secs: u64,
    /// File holding the bot token when no environment variable is set.
    #[serde(default = "default_token_file")]
    pub token_file: String,
}

const fn default_pacing_ms() -> u64 {
    1000
}

const fn default_drain_timeout_secs() -> u64 {
    30
}

fn default_token_file() -> String {
    ".token".to_string()
}

impl TelegramAppConfig {
    #[must_use]
    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }

    #[must_use]
    pub fn drain_timeout(&self) -> Duration {
        Duration::from_secs(self.drain_timeout_secs)
    }
}

impl Default for TelegramAppConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            chat_id: None,
            operator_chat_id: None,
            pacing_ms: default_pacing_ms(),
            drain_timeout_secs: default_drain_timeout_secs(),
            token_file: default_token_file(),
        }
    }
}
