//! HTTP Client Port - the single injected network capability
//!
//! One POST in, one reply (or transport failure) out. Status handling is left
//! to the caller; adapters return every status as `Ok`.

use std::fmt;

use async_trait::async_trait;

/// The only status whose body reaches the page.
pub const HTTP_OK: u16 = 200;

/// A fully built POST request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostRequest {
    pub target_url: String,
    pub content_type: String,
    pub body: String,
}

impl PostRequest {
    pub fn new(
        target_url: impl Into<String>,
        content_type: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            target_url: target_url.into(),
            content_type: content_type.into(),
            body: body.into(),
        }
    }
}

impl fmt::Display for PostRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POST {} ({})", self.target_url, self.body)
    }
}

/// Status and raw body of a completed request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

impl HttpReply {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == HTTP_OK
    }
}

/// The request never produced a reply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Invalid target URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Failed to read response body: {0}")]
    Body(String),
}

impl TransportError {
    pub fn invalid_url(url: impl ToString, message: impl ToString) -> Self {
        Self::InvalidUrl {
            url: url.to_string(),
            message: message.to_string(),
        }
    }

    pub fn network(message: impl ToString) -> Self {
        Self::Network(message.to_string())
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
#[async_trait]
pub trait HttpClientPort: Send + Sync {
    /// Send one POST and wait for its completion.
    async fn post(&self, request: &PostRequest) -> Result<HttpReply, TransportError>;
}

/// Browser futures are not `Send`.
#[cfg(target_arch = "wasm32")]
#[async_trait(?Send)]
pub trait HttpClientPort: Send + Sync {
    async fn post(&self, request: &PostRequest) -> Result<HttpReply, TransportError>;
}
