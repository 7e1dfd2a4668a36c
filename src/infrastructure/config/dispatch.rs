//! Sink dispatch configuration.

use std::time::Duration;

use serde::Deserialize;

use crate::application::dispatch::DispatchMode;

/// Dispatch strategy as written in the config file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DispatchStrategy {
    #[default]
    Concurrent,
    Sequential,
}

/// Sink dispatch configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DispatchConfig {
    #[serde(default)]
    pub mode: DispatchStrategy,
    /// Per-sink deadline in concurrent mode (default: 5).
    #[serde(default = "default_sink_timeout_secs")]
    pub sink_timeout_secs: u64,
}

const fn default_sink_timeout_secs() -> u64 {
    5
}

impl DispatchConfig {
    /// The dispatcher mode this configuration selects.
    #[must_use]
    pub fn to_mode(&self) -> DispatchMode {
        match self.mode {
            DispatchStrategy::Concurrent => DispatchMode::Concurrent {
                timeout: Duration::from_secs(self.sink_timeout_secs),
            },
            DispatchStrategy::Sequential => DispatchMode::Sequential,
        }
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            mode: DispatchStrategy::default(),
            sink_timeout_secs: default_sink_timeout_secs(),
        }
    }
}
