//! Environment configuration
//!
//! Every setting has a default, so an empty environment yields the rich panel
//! talking to `http://localhost`. Lookups go through a closure so tests can
//! supply their own variables.

use crate::domain::layout::{
    DEFAULT_PLAYERS_LABEL_ID, DEFAULT_PLAYERS_SELECT_ID, DEFAULT_RESPONSE_ID, DEFAULT_SENTINEL,
    DEFAULT_SUBMIT_ID,
};
use crate::domain::{PageLayout, PlayersGroup};

pub const ENV_BASE_URL: &str = "FORMSYNC_BASE_URL";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "FORMSYNC_REQUEST_TIMEOUT_MS";
pub const ENV_LAYOUT: &str = "FORMSYNC_LAYOUT";
pub const ENV_SUBMIT_ID: &str = "FORMSYNC_SUBMIT_ID";
pub const ENV_RESPONSE_ID: &str = "FORMSYNC_RESPONSE_ID";
pub const ENV_PLAYERS_LABEL_ID: &str = "FORMSYNC_PLAYERS_LABEL_ID";
pub const ENV_PLAYERS_SELECT_ID: &str = "FORMSYNC_PLAYERS_SELECT_ID";
pub const ENV_SENTINEL: &str = "FORMSYNC_SENTINEL";

pub const DEFAULT_BASE_URL: &str = "http://localhost";

/// Default request timeout in milliseconds (2 minutes)
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 120_000;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: &'static str, message: String },
}

impl ConfigError {
    fn invalid(key: &'static str, message: impl ToString) -> Self {
        Self::InvalidValue {
            key,
            message: message.to_string(),
        }
    }
}

/// Which panel variant the page is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayoutVariant {
    Basic,
    #[default]
    Rich,
}

impl std::str::FromStr for LayoutVariant {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "basic" => Ok(Self::Basic),
            "rich" => Ok(Self::Rich),
            other => Err(ConfigError::invalid(
                ENV_LAYOUT,
                format!("expected 'basic' or 'rich', got '{}'", other),
            )),
        }
    }
}

/// Build the page layout from `FORMSYNC_*` variables.
pub fn layout_from_lookup(
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<PageLayout, ConfigError> {
    let get = |key: &str, default: &str| {
        lookup(key)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| default.to_string())
    };

    let variant = match lookup(ENV_LAYOUT).filter(|v| !v.trim().is_empty()) {
        Some(raw) => raw.parse()?,
        None => LayoutVariant::default(),
    };

    let players = match variant {
        LayoutVariant::Basic => None,
        LayoutVariant::Rich => Some(PlayersGroup {
            label_id: get(ENV_PLAYERS_LABEL_ID, DEFAULT_PLAYERS_LABEL_ID),
            select_id: get(ENV_PLAYERS_SELECT_ID, DEFAULT_PLAYERS_SELECT_ID),
            sentinel: get(ENV_SENTINEL, DEFAULT_SENTINEL),
        }),
    };

    Ok(PageLayout {
        submit_id: get(ENV_SUBMIT_ID, DEFAULT_SUBMIT_ID),
        response_id: get(ENV_RESPONSE_ID, DEFAULT_RESPONSE_ID),
        players,
    })
}

pub fn layout_from_env() -> Result<PageLayout, ConfigError> {
    layout_from_lookup(|key| std::env::var(key).ok())
}

#[cfg(not(target_arch = "wasm32"))]
pub use client::ClientConfig;

#[cfg(not(target_arch = "wasm32"))]
mod client {
    use std::time::Duration;

    use url::Url;

    use super::*;

    /// Settings for the native HTTP client.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct ClientConfig {
        /// Relative form actions are joined onto this.
        pub base_url: Url,
        pub request_timeout: Duration,
        /// Honour `HTTP_PROXY` and friends from the environment.
        pub use_system_proxy: bool,
    }

    impl ClientConfig {
        pub fn new(base_url: &str) -> Result<Self, ConfigError> {
            Ok(Self {
                base_url: Url::parse(base_url).map_err(|e| ConfigError::invalid(ENV_BASE_URL, e))?,
                request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
                use_system_proxy: true,
            })
        }

        pub fn with_timeout(mut self, timeout: Duration) -> Self {
            self.request_timeout = timeout;
            self
        }

        pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
            self.base_url =
                Url::parse(base_url).map_err(|e| ConfigError::invalid(ENV_BASE_URL, e))?;
            Ok(self)
        }

        /// Connect straight to the server, ignoring proxy settings.
        pub fn direct(mut self) -> Self {
            self.use_system_proxy = false;
            self
        }

        pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
            let base_url = lookup(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
            let timeout_ms = match lookup(ENV_REQUEST_TIMEOUT_MS) {
                Some(raw) => raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| ConfigError::invalid(ENV_REQUEST_TIMEOUT_MS, e))?,
                None => DEFAULT_REQUEST_TIMEOUT_MS,
            };
            Ok(Self::new(&base_url)?.with_timeout(Duration::from_millis(timeout_ms)))
        }

        /// Uses `FORMSYNC_BASE_URL` and `FORMSYNC_REQUEST_TIMEOUT_MS`,
        /// falling back to defaults if not set.
        pub fn from_env() -> Result<Self, ConfigError> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }
    }
}
