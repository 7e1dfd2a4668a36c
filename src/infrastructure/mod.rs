//! Infrastructure layer.
//!
//! Provides technical concerns that support the application without containing
//! business logic. This layer handles configuration, credentials, component
//! wiring and the runtime lifecycle.
//!
//! # Submodules
//!
//! - [`bootstrap`] - Composition root for runtime wiring
//! - [`config`] - Configuration loading and validation
//! - [`credentials`] - Telegram bot token resolution
//! - [`orchestration`] - Run-once and watch-mode lifecycle

pub mod bootstrap;
pub mod config;
pub mod credentials;
pub mod orchestration;
