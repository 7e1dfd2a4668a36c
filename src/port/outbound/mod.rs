//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! These contracts describe the collaborators the update cycle depends on:
//! listing sources, the seen store, listing sinks and operator alerts.

pub mod alert;
pub mod sink;
pub mod source;
pub mod store;
