//! Telegram bot token resolution.
//!
//! Lookup order: `TELEGRAM_BOT_TOKEN`, then `TG_TOKEN`, then the configured
//! token file. Blank values count as missing.

use std::path::Path;

use tracing::debug;

use crate::error::{ConfigError, Result};

/// Environment variables checked for the bot token, in order.
pub const TOKEN_ENV_VARS: [&str; 2] = ["TELEGRAM_BOT_TOKEN", "TG_TOKEN"];

/// Resolve the bot token from the process environment or `token_file`.
///
/// # Errors
/// Returns [`ConfigError::MissingField`] if no source yields a token, and
/// [`ConfigError::ReadFile`] if the token file exists but cannot be read.
pub fn resolve_telegram_token(token_file: &Path) -> Result<String> {
    resolve_token_with(|name| std::env::var(name).ok(), token_file)
}

/// Resolve the bot token using `lookup` in place of the process environment.
///
/// # Errors
/// See [`resolve_telegram_token`].
pub fn resolve_token_with(
    lookup: impl Fn(&str) -> Option<String>,
    token_file: &Path,
) -> Result<String> {
    for name in TOKEN_ENV_VARS {
        if let Some(token) = lookup(name).map(|t| t.trim().to_string()) {
            if !token.is_empty() {
                debug!(source = name, "Telegram token resolved from environment");
                return Ok(token);
            }
        }
    }

    match std::fs::read_to_string(token_file) {
        Ok(contents) => {
            let token = contents.trim().to_string();
            if token.is_empty() {
                return Err(ConfigError::MissingField {
                    field: "TELEGRAM_BOT_TOKEN",
                }
                .into());
            }
            debug!(path = %token_file.display(), "Telegram token resolved from file");
            Ok(token)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ConfigError::MissingField {
            field: "TELEGRAM_BOT_TOKEN",
        }
        .into()),
        Err(e) => Err(ConfigError::ReadFile(e).into()),
    }
}

/// Mask a token for display, keeping only the last four characters.
#[must_use]
pub fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 4 {
        return "****".to_string();
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("****{tail}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    fn missing_file() -> std::path::PathBuf {
        std::env::temp_dir().join("rentwatch-token-that-does-not-exist")
    }

    #[test]
    fn primary_variable_wins() {
        let token = resolve_token_with(
            env(&[("TELEGRAM_BOT_TOKEN", "primary"), ("TG_TOKEN", "legacy")]),
            &missing_file(),
        )
        .unwrap();

        assert_eq!(token, "primary");
    }

    #[test]
    fn legacy_variable_is_fallback() {
        let token = resolve_token_with(env(&[("TG_TOKEN", " legacy\n")]), &missing_file()).unwrap();
        assert_eq!(token, "legacy");
    }

    #[test]
    fn blank_variable_falls_through_to_file() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), "from-file\n").unwrap();

        let token = resolve_token_with(env(&[("TELEGRAM_BOT_TOKEN", "  ")]), file.path()).unwrap();

        assert_eq!(token, "from-file");
    }

    #[test]
    fn nothing_found_is_missing_field() {
        let err = resolve_token_with(env(&[]), &missing_file()).unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField { .. })
        ));
    }

    #[test]
    fn empty_file_is_missing_field() {
        let file = tempfile::NamedTempFile::new().unwrap();

        let err = resolve_token_with(env(&[]), file.path()).unwrap_err();

        assert!(matches!(
            err,
            Error::Config(ConfigError::MissingField { .. })
        ));
    }

    #[test]
    fn mask_keeps_last_four() {
        assert_eq!(mask_token("123456:ABCDEF"), "****CDEF");
        assert_eq!(mask_token("abc"), "****");
    }
}
