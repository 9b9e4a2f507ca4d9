//! The single POST exchange underneath the client.

use std::future::Future;

use reqwest::header::CONTENT_TYPE;
use tracing::trace;

use crate::{Error, Result};

/// Status line and full body of one HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one JSON body and hands back the complete response text.
///
/// Implementations must not retry and must not interpret the body.
/// Failures to reach the server map to [`Error::Network`].
pub trait Transport {
    fn post_json(
        &self,
        url: &str,
        body: String,
    ) -> impl Future<Output = Result<TransportResponse>> + Send;
}

/// [`Transport`] over HTTP using `reqwest`. No request timeout is set.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    http: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reuse an existing `reqwest` client (and its connection pool)
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

impl Transport for HttpTransport {
    async fn post_json(&self, url: &str, body: String) -> Result<TransportResponse> {
        trace!(url = %url, bytes = body.len(), "sending POST");

        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        Ok(TransportResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
