//! Infrastructure bootstrap helpers for runtime wiring.
//!
//! Composition root: turns a validated [`Config`] into sources, a seen
//! store, sinks and alert handlers, and assembles them into a [`Watcher`].

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::log::{LogAlerts, LogSink};
use crate::adapter::outbound::site::{HtmlListingSource, HttpPageFetcher};
use crate::adapter::outbound::sqlite::{create_pool, run_migrations, SqliteSeenStore};
use crate::adapter::outbound::telegram::{ChatTransport, Outbox, TelegramAlerts, TelegramSink};
use crate::application::cycle::UpdateCycle;
use crate::application::dispatch::Dispatcher;
use crate::application::health::SourceHealthTracker;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::orchestration::Watcher;
use crate::port::{AlertRegistry, ListingSink, ListingSource, OperatorAlerts};

/// Open the seen store, creating the database file and schema as needed.
///
/// # Errors
/// Returns an error if the parent directory cannot be created, the pool
/// cannot be opened or migrations fail.
pub fn init_store(config: &Config) -> Result<SqliteSeenStore> {
    if config.database != ":memory:" {
        if let Some(parent) = Path::new(&config.database).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
    }

    let pool = create_pool(&config.database)?;
    run_migrations(&pool)?;
    info!(database = %config.database, "Seen store initialized");
    Ok(SqliteSeenStore::new(pool))
}

/// Build one HTML source per configured profile, in config order.
///
/// # Errors
/// Returns an error if a profile has an invalid selector or base URL.
pub fn build_sources(config: &Config) -> Result<Vec<Arc<dyn ListingSource>>> {
    config
        .sources
        .iter()
        .map(|source| {
            let fetcher = Arc::new(HttpPageFetcher::new(source.request_timeout())?);
            let html = HtmlListingSource::new(source.to_profile(), fetcher)?;
            Ok(Arc::new(html) as Arc<dyn ListingSource>)
        })
        .collect()
}

/// Create the Bot API transport when Telegram is enabled.
///
/// # Errors
/// Returns [`ConfigError::MissingField`](crate::error::ConfigError::MissingField)
/// when no bot token resolves.
#[cfg(feature = "telegram")]
pub fn telegram_transport(config: &Config) -> Result<Option<Arc<dyn ChatTransport>>> {
    use crate::adapter::outbound::telegram::BotTransport;
    use crate::infrastructure::credentials::resolve_telegram_token;

    if !config.telegram.enabled {
        return Ok(None);
    }
    let token = resolve_telegram_token(Path::new(&config.telegram.token_file))?;
    Ok(Some(Arc::new(BotTransport::new(&token))))
}

/// Create the Bot API transport when Telegram is enabled.
///
/// # Errors
/// Always fails when Telegram is enabled, since this build has no client.
#[cfg(not(feature = "telegram"))]
pub fn telegram_transport(config: &Config) -> Result<Option<Arc<dyn ChatTransport>>> {
    if config.telegram.enabled {
        return Err(crate::error::ConfigError::InvalidValue {
            field: "telegram.enabled",
            reason: "built without the telegram feature".to_string(),
        }
        .into());
    }
    Ok(None)
}

fn browser_sink(config: &Config) -> Result<Option<Arc<dyn ListingSink>>> {
    if !config.browser.enabled {
        return Ok(None);
    }

    #[cfg(feature = "browser")]
    {
        use crate::adapter::outbound::browser::BrowserSink;
        Ok(Some(Arc::new(BrowserSink)))
    }

    #[cfg(not(feature = "browser"))]
    {
        Err(crate::error::ConfigError::InvalidValue {
            field: "browser.enabled",
            reason: "built without the browser feature".to_string(),
        }
        .into())
    }
}

/// Build the sink list. The log sink is always first.
///
/// # Errors
/// Returns an error if a configured sink is unavailable in this build.
pub fn build_sinks(config: &Config, outbox: Option<&Arc<Outbox>>) -> Result<Vec<Arc<dyn ListingSink>>> {
    let mut sinks: Vec<Arc<dyn ListingSink>> = vec![Arc::new(LogSink)];

    if let (Some(outbox), Some(chat_id)) = (outbox, config.telegram.chat_id) {
        sinks.push(Arc::new(TelegramSink::new(Arc::clone(outbox), chat_id)));
    }
    if let Some(browser) = browser_sink(config)? {
        sinks.push(browser);
    }

    Ok(sinks)
}

/// Build the alert registry. Always includes the log handler.
#[must_use]
pub fn build_alerts(config: &Config, outbox: Option<&Arc<Outbox>>) -> AlertRegistry {
    let mut registry = AlertRegistry::new();
    registry.register(Box::new(LogAlerts));

    if let (Some(outbox), Some(chat_id)) = (outbox, config.telegram.operator_chat_id) {
        registry.register(Box::new(TelegramAlerts::new(Arc::clone(outbox), chat_id)));
    }

    registry
}

/// Assemble a watcher from config and an optional chat transport.
///
/// # Errors
/// Returns an error if the store, a source or a sink cannot be created.
pub fn assemble(config: &Config, transport: Option<Arc<dyn ChatTransport>>) -> Result<Watcher> {
    let store = Arc::new(init_store(config)?);
    let sources = build_sources(config)?;

    let outbox = transport.map(|transport| {
        Arc::new(Outbox::spawn(
            transport,
            config.telegram.pacing(),
            config.telegram.drain_timeout(),
        ))
    });

    let sinks = build_sinks(config, outbox.as_ref())?;
    let alerts: Arc<dyn OperatorAlerts> = Arc::new(build_alerts(config, outbox.as_ref()));

    info!(
        sources = sources.len(),
        sinks = sinks.len(),
        telegram = outbox.is_some(),
        "Components initialized"
    );

    let cycle = UpdateCycle::new(
        sources,
        store,
        Dispatcher::new(sinks, config.dispatch.to_mode()),
        SourceHealthTracker::new(Arc::clone(&alerts)),
    );

    Ok(Watcher::new(cycle, alerts, config.schedule.interval()))
}

/// Build the production watcher for `config`.
///
/// # Errors
/// Fails when Telegram is enabled without a token, or with any error from
/// [`assemble`].
pub fn build_watcher(config: &Config) -> Result<Watcher> {
    let transport = telegram_transport(config)?;
    assemble(config, transport)
}
