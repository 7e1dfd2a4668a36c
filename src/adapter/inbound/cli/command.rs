//! Command-line interface definitions.
//!
//! Defines the CLI structure for rentwatch using `clap`. The two run modes
//! (`once` and `watch`) share their arguments; `check` and `status` are
//! read-mostly diagnostics.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::paths;

/// Rental listing watcher with Telegram and browser notifications
#[derive(Parser, Debug)]
#[command(name = "rentwatch")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v debug, -vv trace) unless --log-level is set
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands for the rentwatch CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a single update cycle and exit
    Once(RunArgs),

    /// Run update cycles on a fixed interval until interrupted
    Watch(RunArgs),

    /// Run diagnostic checks
    #[command(subcommand)]
    Check(CheckCommand),

    /// Show the seen-listings database
    Status(StatusArgs),
}

/// Arguments shared by `once` and `watch`.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to configuration file
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}

/// Subcommands for `rentwatch check`.
#[derive(Subcommand, Debug)]
pub enum CheckCommand {
    /// Validate the configuration file syntax and semantics.
    Config(ConfigPathArg),
    /// Send a test message to the operator chat.
    Telegram(ConfigPathArg),
}

/// Shared argument for commands that only take a config path.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to configuration file
    #[arg(default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for `rentwatch status`.
#[derive(Parser, Debug)]
pub struct StatusArgs {
    /// Path to configuration file
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Database path (overrides the configured one)
    #[arg(long)]
    pub db: Option<PathBuf>,

    /// Number of recent listings to show
    #[arg(long, default_value_t = 10)]
    pub limit: i64,
}
