//! Process-level entry points for the watcher.

use tokio::sync::watch;
use tracing::{info, warn};

use super::watcher::Watcher;
use crate::application::cycle::CycleReport;
use crate::error::Result;
use crate::infrastructure::bootstrap::build_watcher;
use crate::infrastructure::config::settings::Config;

/// Build the watcher and run one cycle.
///
/// # Errors
/// Returns an error if startup wiring fails. Cycle-level failures are
/// reported in the returned [`CycleReport`], never as an error.
pub async fn run_once(config: &Config) -> Result<CycleReport> {
    let mut watcher = build_watcher(config)?;
    Ok(watcher.run_once().await)
}

/// Build the watcher and run it until `shutdown` fires.
///
/// # Errors
/// Returns an error if startup wiring fails.
pub async fn run_watch(config: &Config, shutdown: watch::Receiver<bool>) -> Result<u64> {
    let mut watcher: Watcher = build_watcher(config)?;
    Ok(watcher.run_watch(shutdown).await)
}

/// A shutdown receiver that flips to `true` on Ctrl-C.
#[must_use]
pub fn shutdown_on_ctrl_c() -> watch::Receiver<bool> {
    let (tx, rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                info!("Ctrl-C received, finishing current cycle");
                let _ = tx.send(true);
            }
            Err(e) => {
                // Keep the sender alive; dropping it would stop the watcher.
                warn!(error = %e, "Failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
                drop(tx);
            }
        }
    });
    rx
}
