//! Handlers for `rentwatch once` and `rentwatch watch`.

use serde_json::json;
use tracing::info;

use super::command::RunArgs;
use super::output;
use crate::application::cycle::CycleReport;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::orchestration::{run_once, run_watch, shutdown_on_ctrl_c};

/// Log level from the CLI: `--log-level` wins, otherwise each `-v` raises it
/// one step above the configured level.
fn log_level_override(log_level: Option<&str>, verbose: u8) -> Option<&str> {
    match (log_level, verbose) {
        (Some(level), _) => Some(level),
        (None, 0) => None,
        (None, 1) => Some("debug"),
        (None, _) => Some("trace"),
    }
}

/// Load the config, apply CLI overrides and start logging.
fn prepare(args: &RunArgs) -> Result<Config> {
    let mut config = Config::load(&args.config)?;
    // `--json` implies JSON logs so stderr stays machine-readable too.
    config.logging.apply_overrides(
        log_level_override(args.log_level.as_deref(), output::verbosity()),
        args.json_logs || output::is_json(),
    );
    config.init_logging();
    Ok(config)
}

/// Run one update cycle and print what it did.
pub async fn execute_once(args: &RunArgs) -> Result<()> {
    let config = prepare(args)?;
    info!(config = %args.config.display(), "Running single update cycle");

    let summary = run_once(&config).await?;
    print_report(&summary);
    Ok(())
}

/// Run update cycles until Ctrl-C.
pub async fn execute_watch(args: &RunArgs) -> Result<()> {
    let config = prepare(args)?;
    info!(
        config = %args.config.display(),
        interval_secs = config.schedule.interval_secs,
        "Starting watch mode"
    );

    let cycles = run_watch(&config, shutdown_on_ctrl_c()).await?;

    if output::is_json() {
        output::json_output(json!({
            "command": "watch",
            "cycles": cycles,
            "status": "stopped",
        }));
        return Ok(());
    }

    output::section("Watch");
    output::field("Cycles", cycles);
    output::success("Stopped cleanly");
    Ok(())
}

fn print_report(summary: &CycleReport) {
    if output::is_json() {
        output::json_output(json!({
            "command": "once",
            "fetched": summary.fetched,
            "new": summary.new,
            "already_seen": summary.already_seen,
            "store_failures": summary.store_failures,
            "failed_sources": summary.failed_sources,
            "empty_sources": summary.empty_sources,
        }));
        return;
    }

    output::section("Update Cycle");
    output::field("Fetched", summary.fetched);
    output::field("New", output::highlight(summary.new));
    output::field("Already seen", summary.already_seen);
    if summary.store_failures > 0 {
        output::field("Store errors", summary.store_failures);
    }
    for source in &summary.failed_sources {
        output::warning(&format!("{source} failed"));
    }
    for source in &summary.empty_sources {
        output::warning(&format!("{source} returned no listings"));
    }
    if summary.failed_sources.is_empty() && summary.empty_sources.is_empty() {
        output::success("All sources healthy");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_log_level_beats_verbosity() {
        assert_eq!(log_level_override(Some("warn"), 2), Some("warn"));
    }

    #[test]
    fn verbosity_raises_log_level() {
        assert_eq!(log_level_override(None, 0), None);
        assert_eq!(log_level_override(None, 1), Some("debug"));
        assert_eq!(log_level_override(None, 3), Some("trace"));
    }
}
