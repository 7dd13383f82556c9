//! Driver front door.
//!
//! - `Driver` - driver metadata, connection string parsing, connection factory
//! - `Connector` - produces connections that have answered a ping
//! - `Connection` - executes statements against one database
//! - `DriverRegistry` - explicit name to driver map owned by the host application
//!
//! # Example
//!
//! ```no_run
//! use openmldb_rs::driver::{Driver, DriverRegistry};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = DriverRegistry::new();
//! Driver::register_default(&registry);
//!
//! let connector = registry.open_connector("openmldb", "openmldb://localhost:9527/demo_db")?;
//! let mut connection = connector.connect().await?;
//!
//! connection.exec("CREATE TABLE demo(c1 int, c2 string);", &[]).await?;
//! connection.close()?;
//! # Ok(())
//! # }
//! ```

pub mod connection;
pub mod connector;
#[allow(clippy::module_inception)]
pub mod driver;
pub mod registry;

pub use connection::Connection;
pub use connector::Connector;
pub use driver::{Driver, DRIVER_NAME};
pub use registry::DriverRegistry;
