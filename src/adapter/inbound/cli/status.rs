//! Handler for the `status` command.

use std::path::{Path, PathBuf};

use crate::adapter::inbound::cli::command::StatusArgs;
use crate::adapter::inbound::cli::{output, paths};
use crate::adapter::outbound::sqlite::{create_pool, run_migrations, SqliteSeenStore};
use crate::domain::SeenRecord;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::SeenStore;
use serde_json::json;

/// Seen-store contents shown by `status`.
#[derive(Debug, Clone)]
pub struct StatusSnapshot {
    pub total: u64,
    pub recent: Vec<SeenRecord>,
}

/// Which database `status` reads: `--db`, else the config's, else the default.
fn database_path(args: &StatusArgs) -> PathBuf {
    if let Some(db) = &args.db {
        return db.clone();
    }
    Config::load(&args.config)
        .map(|config| PathBuf::from(config.database))
        .unwrap_or_else(|_| paths::default_database())
}

/// Read the total count and the newest `limit` records.
///
/// # Errors
/// Returns an error if the database cannot be opened or queried.
pub async fn load_status(db_path: &Path, limit: i64) -> Result<StatusSnapshot> {
    let pool = create_pool(&db_path.to_string_lossy())?;
    run_migrations(&pool)?;
    let store = SqliteSeenStore::new(pool);

    Ok(StatusSnapshot {
        total: store.count().await?,
        recent: store.recent(limit)?,
    })
}

/// Execute the status command.
pub async fn execute(args: &StatusArgs) {
    if output::is_quiet() && !output::is_json() {
        return;
    }

    let db_path = database_path(args);
    let database = db_path.display().to_string();

    if output::is_json() {
        let payload = if db_path.exists() {
            match load_status(&db_path, args.limit).await {
                Ok(snapshot) => json!({
                    "command": "status",
                    "database": database,
                    "status": "ok",
                    "total": snapshot.total,
                    "recent": snapshot.recent.iter().map(record_to_json).collect::<Vec<_>>(),
                }),
                Err(error) => json!({
                    "command": "status",
                    "database": database,
                    "status": "error",
                    "error": error.to_string(),
                }),
            }
        } else {
            json!({
                "command": "status",
                "database": database,
                "status": "missing_database",
            })
        };
        output::json_output(payload);
        return;
    }

    output::header(env!("CARGO_PKG_VERSION"));
    output::field("Database", &database);

    if !db_path.exists() {
        println!();
        output::warning(&format!("Database not found ({database})"));
        output::hint("run `rentwatch once` to create it");
        return;
    }

    match load_status(&db_path, args.limit).await {
        Ok(snapshot) => display_snapshot(&snapshot),
        Err(error) => {
            println!();
            output::warning(&format!("Database error reading status: {error}"));
        }
    }
}

fn record_to_json(record: &SeenRecord) -> serde_json::Value {
    json!({
        "source": record.source,
        "name": record.name,
        "price": record.price,
        "address": record.address,
        "link": record.link,
        "first_seen": record.first_seen.to_rfc3339(),
    })
}

fn display_snapshot(snapshot: &StatusSnapshot) {
    output::field("Seen listings", output::highlight(snapshot.total));

    if snapshot.recent.is_empty() {
        return;
    }

    output::section("Recent");
    for record in &snapshot.recent {
        output::listing(&record.name, &record.price, &record.address, &record.link);
        println!(
            "    {}",
            output::muted(format!(
                "{} · {}",
                record.source,
                record.first_seen.format("%Y-%m-%d %H:%M")
            ))
        );
    }
}
