use std::fmt::Write as _;

use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config")]
    Parse(#[source] toml::de::Error),

    #[error("{0}")]
    Other(String),
}

/// Failures while fetching listings from a source.
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("request to {url} failed")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} responded with HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("invalid selector {selector:?}: {reason}")]
    Selector { selector: String, reason: String },

    #[error("source panicked: {0}")]
    Panicked(String),

    #[error("page layout mismatch: {0}")]
    Layout(String),

    #[error("invalid link {link:?}")]
    Link {
        link: String,
        #[source]
        source: url::ParseError,
    },
}

/// Failures while delivering a listing to a sink.
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("sink queue closed")]
    QueueClosed,

    #[error("delivery failed: {0}")]
    Delivery(String),

    #[error("failed to open browser")]
    Browser(#[source] std::io::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Source(#[from] SourceError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Render an error together with every error in its source chain.
///
/// Used for operator alerts, where the whole chain is the only debugging
/// context the operator gets.
pub fn report(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let _ = write!(out, "\ncaused by: {cause}");
        source = cause.source();
    }
    out
}
