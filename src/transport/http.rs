//! HTTP transport implementation.
//!
//! Sends request bodies to the API server with a shared `reqwest` client.

use async_trait::async_trait;
use log::{debug, trace};
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use std::time::{Duration, Instant};

use crate::error::TransportError;

use super::protocol::{TransportProtocol, TransportResponse};

/// HTTP transport implementation.
///
/// Holds no per-request state; a single instance can serve any number of
/// sequential requests.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    /// Create a new HTTP transport.
    ///
    /// # Arguments
    ///
    /// * `connect_timeout` - Upper bound for establishing the TCP connection
    ///
    /// # Errors
    ///
    /// Returns `TransportError` if the HTTP client cannot be built.
    pub fn new(connect_timeout: Duration) -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()?;
        Ok(Self { client })
    }

    /// Create a transport around an existing client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl TransportProtocol for HttpTransport {
    async fn post(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse, TransportError> {
        let start = Instant::now();
        debug!("Sending POST to {} ({} bytes)", url, body.len());

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(
            "Response received: status={} bytes={} duration_ms={}",
            status,
            body.len(),
            start.elapsed().as_millis()
        );
        trace!("Response body: {}", String::from_utf8_lossy(&body));

        Ok(TransportResponse::new(status, body))
    }
}
