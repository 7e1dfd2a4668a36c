use std::path::Path;

use crate::adapter::inbound::cli::output;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::credentials::resolve_telegram_token;
use serde_json::json;

/// What `check config` found, independent of how it is printed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigCheckReport {
    pub database: String,
    pub interval_secs: u64,
    pub sources: Vec<String>,
    pub sinks: Vec<&'static str>,
    pub telegram_enabled: bool,
    pub telegram_token_present: bool,
}

impl ConfigCheckReport {
    /// Summarize a validated config. `token_present` reports whether the
    /// bot token resolves; it is only consulted when Telegram is enabled.
    #[must_use]
    pub fn from_config(config: &Config, token_present: impl FnOnce() -> bool) -> Self {
        let mut sinks = vec!["log"];
        if config.telegram.enabled {
            sinks.push("telegram");
        }
        if config.browser.enabled {
            sinks.push("browser");
        }

        Self {
            database: config.database.clone(),
            interval_secs: config.schedule.interval_secs,
            sources: config.source_names(),
            sinks,
            telegram_enabled: config.telegram.enabled,
            telegram_token_present: config.telegram.enabled && token_present(),
        }
    }

    /// Whether `once` or `watch` would start with this config.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.telegram_enabled || self.telegram_token_present
    }
}

/// Validate a configuration file without running a cycle.
pub fn execute_config<P: AsRef<Path>>(config_path: P) -> Result<()> {
    let path = config_path.as_ref();
    let config = Config::load(path)?;
    let report = ConfigCheckReport::from_config(&config, || {
        resolve_telegram_token(Path::new(&config.telegram.token_file)).is_ok()
    });

    if output::is_json() {
        output::json_output(json!({
            "command": "check.config",
            "config": path.display().to_string(),
            "database": report.database,
            "interval_secs": report.interval_secs,
            "sources": report.sources,
            "sinks": report.sinks,
            "telegram_token_present": report.telegram_token_present,
            "status": if report.is_ready() { "ok" } else { "missing_token" },
        }));
        return Ok(());
    }

    output::section("Configuration Check");
    output::field("Config", path.display());
    output::success("Configuration file is valid");

    output::section("Summary");
    output::field("Database", &report.database);
    output::field("Interval", format!("{}s", report.interval_secs));
    output::field("Sources", report.sources.join(", "));
    output::field("Sinks", report.sinks.join(", "));

    if report.telegram_enabled {
        if report.telegram_token_present {
            output::success("Telegram bot token found");
        } else {
            output::warning("Telegram enabled but no bot token found");
            output::field("Missing", "TELEGRAM_BOT_TOKEN");
            output::hint(&format!(
                "set TELEGRAM_BOT_TOKEN or write the token to {}",
                config.telegram.token_file
            ));
        }
    } else {
        output::field("Telegram", "disabled");
    }

    output::success("Configuration check complete");

    Ok(())
}
