//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; the Telegram bot token is resolved
//! separately from the environment or a token file.
//!
//! # Example
//!
//! ```no_run
//! use rentwatch::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use url::Url;

use super::browser::BrowserConfig;
use super::dispatch::DispatchConfig;
use super::logging::LoggingConfig;
use super::schedule::ScheduleConfig;
use super::source::{builtin_sources, SourceConfig};
use super::telegram::TelegramAppConfig;
use crate::error::{ConfigError, Result};

/// Main application configuration.
///
/// Every section is optional. Load from a TOML file using [`Config::load`] or
/// parse directly with [`Config::parse_toml`].
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Path to SQLite database file.
    ///
    /// Defaults to "rentwatch.db" in the current directory.
    #[serde(default = "default_database_path")]
    pub database: String,

    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Watch-mode cycle interval.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// How new listings are fanned out to sinks.
    #[serde(default)]
    pub dispatch: DispatchConfig,

    /// Telegram delivery.
    #[serde(default)]
    pub telegram: TelegramAppConfig,

    /// Browser sink.
    #[serde(default)]
    pub browser: BrowserConfig,

    /// Listing sources, fetched in order.
    ///
    /// Defaults to the built-in Pararius and Funda profiles.
    #[serde(default = "builtin_sources")]
    pub sources: Vec<SourceConfig>,
}

fn default_database_path() -> String {
    "rentwatch.db".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database_path(),
            logging: LoggingConfig::default(),
            schedule: ScheduleConfig::default(),
            dispatch: DispatchConfig::default(),
            telegram: TelegramAppConfig::default(),
            browser: BrowserConfig::default(),
            sources: builtin_sources(),
        }
    }
}

fn must_be_positive(field: &'static str, value: u64) -> Result<()> {
    if value == 0 {
        return Err(ConfigError::InvalidValue {
            field,
            reason: "must be greater than 0".to_string(),
        }
        .into());
    }
    Ok(())
}

fn must_be_url(field: &'static str, value: &str) -> Result<()> {
    Url::parse(value).map(|_| ()).map_err(|e| {
        ConfigError::InvalidValue {
            field,
            reason: format!("{value:?} is not a valid URL: {e}"),
        }
        .into()
    })
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., a zero interval or duplicate source names)
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Validate configuration values.
    ///
    /// Checks that all required fields are present and values are within
    /// acceptable ranges.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        if self.database.trim().is_empty() {
            return Err(ConfigError::MissingField { field: "database" }.into());
        }

        must_be_positive("schedule.interval_secs", self.schedule.interval_secs)?;
        must_be_positive("dispatch.sink_timeout_secs", self.dispatch.sink_timeout_secs)?;

        if self.telegram.enabled {
            if self.telegram.chat_id.is_none() {
                return Err(ConfigError::MissingField {
                    field: "telegram.chat_id",
                }
                .into());
            }
            if self.telegram.operator_chat_id.is_none() {
                return Err(ConfigError::MissingField {
                    field: "telegram.operator_chat_id",
                }
                .into());
            }
            must_be_positive(
                "telegram.drain_timeout_secs",
                self.telegram.drain_timeout_secs,
            )?;
        }

        if self.sources.is_empty() {
            return Err(ConfigError::MissingField { field: "sources" }.into());
        }

        let mut names = HashSet::new();
        for source in &self.sources {
            if source.name.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: "sources.name",
                    reason: "must not be empty".to_string(),
                }
                .into());
            }
            if !names.insert(source.name.as_str()) {
                return Err(ConfigError::InvalidValue {
                    field: "sources.name",
                    reason: format!("duplicate source name {:?}", source.name),
                }
                .into());
            }
            must_be_url("sources.url", &source.url)?;
            must_be_url("sources.base_url", &source.base_url)?;
            must_be_positive("sources.deadline_secs", source.deadline_secs)?;
            must_be_positive("sources.poll_interval_ms", source.poll_interval_ms)?;
            must_be_positive("sources.request_timeout_secs", source.request_timeout_secs)?;
        }

        Ok(())
    }

    /// Names of the configured sources, in fetch order.
    #[must_use]
    pub fn source_names(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.name.clone()).collect()
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::parse_toml("").unwrap();

        assert_eq!(config.database, "rentwatch.db");
        assert_eq!(config.schedule.interval_secs, 600);
        assert_eq!(config.dispatch.sink_timeout_secs, 5);
        assert_eq!(config.telegram.pacing_ms, 1000);
        assert_eq!(config.telegram.token_file, ".token");
        assert!(!config.telegram.enabled);
        assert!(!config.browser.enabled);
        assert_eq!(config.source_names(), vec!["pararius", "funda"]);
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = Config::parse_toml("[schedule]\ninterval_secs = 0\n").unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::InvalidValue {
                field: "schedule.interval_secs",
                ..
            })
        ));
    }

    #[test]
    fn telegram_requires_both_chats() {
        let err = Config::parse_toml("[telegram]\nenabled = true\nchat_id = -1\n").unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField {
                field: "telegram.operator_chat_id"
            })
        ));
    }

    #[test]
    fn empty_sources_list_is_rejected() {
        let err = Config::parse_toml("sources = []\n").unwrap_err();
        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField { field: "sources" })
        ));
    }

    #[test]
    fn unknown_dispatch_mode_is_parse_error() {
        let err = Config::parse_toml("[dispatch]\nmode = \"parallel\"\n").unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::Parse(_))));
    }
}
