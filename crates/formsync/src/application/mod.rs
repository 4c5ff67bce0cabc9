//! Application layer: the bridge service and its error type.

pub mod error;
pub mod services;

pub use error::BridgeError;
pub use services::{container_markup, FormSyncBridge, NotifyOutcome};
