//! Canonical test configurations.
//!
//! Single source of truth for config structs used across tests.
//! Avoids each test module defining its own slightly-different defaults.

use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::source::{SelectorConfig, SourceConfig};
use crate::infrastructure::config::telegram::TelegramAppConfig;

/// In-memory database, log sinks only, one test source.
pub fn config() -> Config {
    Config {
        database: ":memory:".to_string(),
        sources: vec![source("test")],
        ..Config::default()
    }
}

/// Telegram enabled with distinct listing and operator chats and no pacing.
pub fn telegram() -> TelegramAppConfig {
    TelegramAppConfig {
        enabled: true,
        chat_id: Some(-100),
        operator_chat_id: Some(7),
        pacing_ms: 0,
        drain_timeout_secs: 5,
        token_file: ".token".to_string(),
    }
}

/// A source pointing at a non-routable test host.
pub fn source(name: &str) -> SourceConfig {
    SourceConfig {
        name: name.to_string(),
        url: format!("https://{name}.listings.test/search"),
        base_url: format!("https://{name}.listings.test"),
        ready_marker: None,
        deadline_secs: 1,
        poll_interval_ms: 100,
        request_timeout_secs: 1,
        selectors: SelectorConfig {
            title: ".title".to_string(),
            address: ".address".to_string(),
            link: ".link".to_string(),
            price: ".price".to_string(),
        },
    }
}
