//! Browser HTTP client using gloo-net (fetch)
//!
//! Relative form actions are resolved by the browser against the page URL.

use gloo_net::http::Request;

use crate::ports::outbound::{HttpClientPort, HttpReply, PostRequest, TransportError};

#[derive(Debug, Clone, Copy, Default)]
pub struct GlooHttpClient;

impl GlooHttpClient {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait(?Send)]
impl HttpClientPort for GlooHttpClient {
    async fn post(&self, request: &PostRequest) -> Result<HttpReply, TransportError> {
        let response = Request::post(&request.target_url)
            .header("Content-Type", &request.content_type)
            .body(request.body.clone())
            .map_err(|e| TransportError::invalid_url(&request.target_url, e))?
            .send()
            .await
            .map_err(TransportError::network)?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(HttpReply::new(status, body))
    }
}
