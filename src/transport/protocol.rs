//! Transport protocol abstraction trait.
//!
//! This module defines the `TransportProtocol` trait that abstracts how a
//! request body reaches the API server, so connections can be exercised
//! against mock transports in tests.

use crate::error::TransportError;
use async_trait::async_trait;

/// Raw HTTP response handed back to the codec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body bytes
    pub body: Vec<u8>,
}

impl TransportResponse {
    /// Create a response.
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Create a `200 OK` response.
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }

    /// Check for a 2xx status.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport protocol trait for API server communication.
///
/// One call is one request/response cycle. Implementations must not retry.
#[async_trait]
pub trait TransportProtocol: Send + Sync {
    /// POST a JSON body to `url` and return the raw response.
    ///
    /// # Errors
    ///
    /// Returns `TransportError` on network failure. A non-success HTTP
    /// status is not an error at this layer.
    async fn post(&self, url: &str, body: Vec<u8>) -> Result<TransportResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_ok() {
        let resp = TransportResponse::ok("{}");
        assert_eq!(resp.status, 200);
        assert!(resp.is_success());
        assert_eq!(resp.body, b"{}".to_vec());
    }

    #[test]
    fn test_response_status() {
        assert!(!TransportResponse::new(500, Vec::new()).is_success());
        assert!(!TransportResponse::new(404, "nope").is_success());
        assert!(TransportResponse::new(204, Vec::new()).is_success());
    }
}
