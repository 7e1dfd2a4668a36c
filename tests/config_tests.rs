use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use rentwatch::application::dispatch::DispatchMode;
use rentwatch::error::{ConfigError, Error};
use rentwatch::infrastructure::config::settings::Config;
use tempfile::TempDir;

fn write_temp_config(contents: &str) -> (TempDir, PathBuf) {
    let dir = tempfile::tempdir().expect("create temp dir");
    let path = dir.path().join("config.toml");
    fs::write(&path, contents).expect("write temp config");
    (dir, path)
}

#[test]
fn full_config_file_loads() {
    let toml = r#"
database = "data/seen.db"

[logging]
level = "debug"
format = "json"

[schedule]
interval_secs = 300

[dispatch]
mode = "sequential"
sink_timeout_secs = 8

[telegram]
enabled = true
chat_id = -1001234
operator_chat_id = 42
pacing_ms = 500

[browser]
enabled = true

[[sources]]
name = "pararius"
url = "https://www.pararius.nl/huurwoningen/amsterdam/1500-2000"
base_url = "https://www.pararius.nl"
ready_marker = ".search-list-sorting"
deadline_secs = 15

[sources.selectors]
title = ".listing-search-item__title"
address = ".listing-search-item__sub-title"
link = ".listing-search-item__link--title"
price = ".listing-search-item__price"
"#;
    let (_dir, path) = write_temp_config(toml);

    let config = Config::load(&path).unwrap();

    assert_eq!(config.database, "data/seen.db");
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.schedule.interval(), Duration::from_secs(300));
    assert_eq!(config.dispatch.to_mode(), DispatchMode::Sequential);
    assert_eq!(config.telegram.chat_id, Some(-1001234));
    assert_eq!(config.telegram.pacing(), Duration::from_millis(500));
    assert!(config.browser.enabled);
    assert_eq!(config.source_names(), vec!["pararius"]);
    assert_eq!(config.sources[0].poll_interval_ms, 300);
}

#[test]
fn missing_file_is_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = Config::load(dir.path().join("absent.toml"));

    assert!(matches!(
        result,
        Err(Error::Config(ConfigError::ReadFile(_)))
    ));
}

#[test]
fn malformed_toml_is_parse_error() {
    let (_dir, path) = write_temp_config("[schedule\ninterval_secs = 5");

    assert!(matches!(
        Config::load(&path),
        Err(Error::Config(ConfigError::Parse(_)))
    ));
}

#[test]
fn telegram_without_operator_chat_is_rejected() {
    let toml = r#"
[telegram]
enabled = true
chat_id = 1
"#;
    let (_dir, path) = write_temp_config(toml);

    let err = Config::load(&path).unwrap_err();

    assert!(
        err.to_string().contains("telegram.operator_chat_id"),
        "unexpected error: {err}"
    );
}

#[test]
fn source_with_relative_base_url_is_rejected() {
    let toml = r#"
[[sources]]
name = "local"
url = "https://listings.test/search"
base_url = "/relative"

[sources.selectors]
title = ".t"
address = ".a"
link = ".l"
price = ".p"
"#;
    let (_dir, path) = write_temp_config(toml);

    let err = Config::load(&path).unwrap_err();

    assert!(matches!(
        err,
        Error::Config(ConfigError::InvalidValue {
            field: "sources.base_url",
            ..
        })
    ));
}
