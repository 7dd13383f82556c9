//! # openmldb-rs
//!
//! SQL driver for the OpenMLDB API server.
//!
//! Every statement is one HTTP POST of a JSON document to
//! `http://{host}/dbs/{database}`. Parameters travel with explicit per-column
//! type tags, and results come back as a typed row cursor.
//!
//! ## Example
//!
//! ```no_run
//! # use openmldb_rs::*;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Register the driver and connect with a reachability check
//! let registry = DriverRegistry::new();
//! Driver::register_default(&registry);
//! let connector = registry.open_connector("openmldb", "openmldb://localhost:9527/demo_db")?;
//! let mut connection = connector.connect().await?;
//!
//! connection.exec("CREATE TABLE demo(c1 int, c2 string);", &[]).await?;
//! connection
//!     .exec("INSERT INTO demo VALUES (?, ?);", &[Value::from(1i32), Value::from("bb")])
//!     .await?;
//!
//! if let Some(mut rows) = connection.query("SELECT c1, c2 FROM demo;", &[]).await? {
//!     let mut row = vec![Value::UntypedNull; rows.column_count()];
//!     while rows.next_row(&mut row)? {
//!         println!("{:?}", row);
//!     }
//! }
//!
//! connection.close()?;
//! # Ok(())
//! # }
//! ```

pub mod codec;
pub mod connection;
pub mod driver;
pub mod error;
pub mod query;
pub mod transport;
pub mod types;

// Re-export public API
pub use connection::{ConnectionBuilder, ConnectionParams, QueryMode};
pub use driver::{Connection, Connector, Driver, DriverRegistry};
pub use error::{
    ConnectionError, ConversionError, ErrorCategory, OpenMldbError, QueryError, TransportError,
};
pub use query::{QueryResult, Rows};
pub use types::{Scalar, SqlType, Value};
