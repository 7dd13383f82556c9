//! Connection configuration for the API server.
//!
//! This module provides connection string parsing, the parameter builder and
//! the query mode sent with every request.
//!
//! # Example
//!
//! ```
//! # use openmldb_rs::connection::{ConnectionBuilder, ConnectionParams, QueryMode};
//! # use std::str::FromStr;
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Using ConnectionBuilder
//! let params = ConnectionBuilder::new()
//!     .host("localhost:9527")
//!     .database("demo_db")
//!     .mode(QueryMode::OffSync)
//!     .query_timeout(std::time::Duration::from_secs(10))
//!     .build()?;
//!
//! // Or parse from connection string
//! let parsed = ConnectionParams::from_str(
//!     "openmldb://localhost:9527/demo_db?mode=offsync&timeout=10"
//! )?;
//! assert_eq!(params, parsed);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod mode;
pub mod params;

pub use mode::QueryMode;
pub use params::{ConnectionBuilder, ConnectionParams, SCHEME};
