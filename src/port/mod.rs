//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! Ports define the extension points in the hexagonal architecture.
//! They are traits that adapters implement to integrate with external
//! systems (listing sites, databases, notification services, etc.).
//!
//! # Architecture
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!                    │                         │
//!     ┌──────────────┤  Domain + Port          ├──────────────┐
//!     │              │                         │              │
//!     │              └─────────────────────────┘              │
//!     │                         │                             │
//!     ▼                         ▼                             ▼
//! ┌─────────┐            ┌─────────────┐              ┌───────────┐
//! │ Source  │            │ Seen store  │              │Sink/Alerts│
//! │ Adapter │            │   Adapter   │              │  Adapter  │
//! └─────────┘            └─────────────┘              └───────────┘
//! ```
//!
//! # Available Ports
//!
//! - [`ListingSource`] - Listing sites
//! - [`SeenStore`] - Deduplication registry
//! - [`ListingSink`] - Listing notifications (Telegram, browser, logs)
//! - [`OperatorAlerts`] - Health alerts and heartbeats

pub mod outbound;

pub use outbound::alert::{Alert, AlertRegistry, NullAlerts, OperatorAlerts};
pub use outbound::sink::ListingSink;
pub use outbound::source::ListingSource;
pub use outbound::store::SeenStore;
