//! Transport layer for API server communication.
//!
//! This module provides the transport protocol abstraction and the HTTP
//! implementation used by connections.
//!
//! # Architecture
//!
//! The transport layer is organized into:
//! - `protocol` - Transport protocol trait definition
//! - `messages` - Request and response message types
//! - `http` - HTTP transport implementation
//!
//! # Example
//!
//! ```no_run
//! use openmldb_rs::transport::{HttpTransport, TransportProtocol};
//! use std::time::Duration;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new(Duration::from_secs(10))?;
//! let body = br#"{"mode":"online","sql":"SELECT 1"}"#.to_vec();
//! let response = transport.post("http://127.0.0.1:9527/dbs/demo", body).await?;
//! println!("HTTP {}", response.status);
//! # Ok(())
//! # }
//! ```

pub mod http;
pub mod messages;
pub mod protocol;

// Re-export commonly used types
pub use http::HttpTransport;
pub use messages::{QueryInput, QueryRequest, RawQueryResponse, RawResultData};
pub use protocol::{TransportProtocol, TransportResponse};
