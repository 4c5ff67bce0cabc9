//! Application services

pub mod form_sync_service;

pub use form_sync_service::{container_markup, FormSyncBridge, NotifyOutcome};
