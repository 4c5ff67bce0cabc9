//! Form-Sync Bridge.
//!
//! Wires the LED-matrix control panel's form controls to the server: each
//! interaction becomes one urlencoded POST, and a 200 reply replaces the
//! response container's markup. Multi-platform support is provided via
//! compile-time `cfg` selection.

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use application::{container_markup, BridgeError, FormSyncBridge, NotifyOutcome};
pub use domain::{FormControl, PageLayout, PowerState};
