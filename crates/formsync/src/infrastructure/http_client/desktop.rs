//! Native HTTP client using reqwest

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use url::Url;

use crate::infrastructure::config::ClientConfig;
use crate::ports::outbound::{HttpClientPort, HttpReply, PostRequest, TransportError};

/// Client for the panel's control endpoint.
///
/// Form actions are usually relative (`/control`), so every target is joined
/// onto the configured base URL; absolute targets pass through unchanged.
#[derive(Clone)]
pub struct ReqwestHttpClient {
    client: Client,
    base_url: Url,
}

impl ReqwestHttpClient {
    pub fn new(config: &ClientConfig) -> Self {
        let mut builder = Client::builder().timeout(config.request_timeout);
        if !config.use_system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.base_url.clone(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn resolve(&self, target: &str) -> Result<Url, TransportError> {
        self.base_url
            .join(target)
            .map_err(|e| TransportError::invalid_url(target, e))
    }
}

fn map_send_error(e: reqwest::Error) -> TransportError {
    if e.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::network(e)
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttpClient {
    async fn post(&self, request: &PostRequest) -> Result<HttpReply, TransportError> {
        let url = self.resolve(&request.target_url)?;
        tracing::debug!(%url, body = %request.body, "POST");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, request.content_type.as_str())
            .body(request.body.clone())
            .send()
            .await
            .map_err(map_send_error)?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransportError::Timeout
            } else {
                TransportError::Body(e.to_string())
            }
        })?;

        Ok(HttpReply::new(status, body))
    }
}
