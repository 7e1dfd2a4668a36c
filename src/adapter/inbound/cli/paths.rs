//! Path utilities for rentwatch.
//!
//! Default locations live under `~/.rentwatch/`:
//! - `~/.rentwatch/config.toml` - main configuration
//! - `~/.rentwatch/rentwatch.db` - seen listings database

use std::path::PathBuf;

/// Returns the rentwatch home directory (`~/.rentwatch/`).
pub fn home_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".rentwatch")
}

/// Returns the default config file path (`~/.rentwatch/config.toml`).
pub fn default_config() -> PathBuf {
    home_dir().join("config.toml")
}

/// Returns the default database path (`~/.rentwatch/rentwatch.db`).
pub fn default_database() -> PathBuf {
    home_dir().join("rentwatch.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_under_rentwatch_home() {
        let home = home_dir();
        let config = default_config();
        let db = default_database();

        assert!(home.to_string_lossy().contains(".rentwatch"));
        assert!(config.starts_with(&home));
        assert!(db.starts_with(&home));
    }
}
