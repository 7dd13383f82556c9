//! Driver implementation.
//!
//! This module provides the `Driver` type which contains metadata about the
//! openmldb-rs driver and serves as the factory for connections.

use crate::connection::ConnectionParams;
use crate::driver::{Connection, Connector, DriverRegistry};
use crate::error::OpenMldbError;
use std::str::FromStr;

/// Name the driver registers itself under.
pub const DRIVER_NAME: &str = "openmldb";

/// Driver for the OpenMLDB API server.
///
/// # Example
///
/// ```
/// use openmldb_rs::driver::Driver;
///
/// let driver = Driver::new();
/// println!("Driver: {} v{}", driver.name(), driver.version());
/// println!("Vendor: {}", driver.vendor());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    name: String,
    version: String,
    vendor: String,
    description: String,
}

impl Driver {
    /// Create a new Driver instance.
    ///
    /// ```
    /// use openmldb_rs::driver::Driver;
    ///
    /// let driver = Driver::new();
    /// assert_eq!(driver.name(), "openmldb");
    /// ```
    pub fn new() -> Self {
        Self {
            name: DRIVER_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            vendor: "openmldb-rs contributors".to_string(),
            description: "SQL driver for the OpenMLDB HTTP API server".to_string(),
        }
    }

    /// Get the driver name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the driver version.
    ///
    /// # Returns
    ///
    /// The version string from the Cargo.toml.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Get the vendor name.
    pub fn vendor(&self) -> &str {
        &self.vendor
    }

    /// Get the driver description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Register this driver under [`DRIVER_NAME`].
    ///
    /// Returns `false` if the name was already taken.
    pub fn register_default(registry: &DriverRegistry) -> bool {
        registry.register(DRIVER_NAME, Self::new())
    }

    /// Open an unverified connection.
    ///
    /// No request is sent. The connection string has the form
    /// `[openmldb:]//host[:port]/database[?mode=online|offline|offsync|offasync]`.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` if the connection string is invalid, or
    /// `TransportError` if the HTTP client cannot be built.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use openmldb_rs::driver::Driver;
    ///
    /// # fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let driver = Driver::new();
    /// let connection = driver.open("openmldb://localhost:9527/demo_db?mode=offline")?;
    /// assert!(!connection.is_closed());
    /// # Ok(())
    /// # }
    /// ```
    pub fn open(&self, connection_string: &str) -> Result<Connection, OpenMldbError> {
        let params = ConnectionParams::from_str(connection_string)?;
        Ok(Connection::from_params(params)?)
    }

    /// Parse a connection string into a [`Connector`] that verifies
    /// reachability on every `connect`.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError` if the connection string is invalid.
    pub fn open_connector(&self, connection_string: &str) -> Result<Connector, OpenMldbError> {
        let params = ConnectionParams::from_str(connection_string)?;
        Ok(Connector::new(self.clone(), params))
    }

    /// Check if a connection string is valid without connecting.
    ///
    /// ```
    /// use openmldb_rs::driver::Driver;
    ///
    /// let driver = Driver::new();
    /// assert!(driver.validate_connection_string("openmldb://localhost:9527/demo_db"));
    /// assert!(!driver.validate_connection_string("mysql://localhost/demo_db"));
    /// ```
    pub fn validate_connection_string(&self, connection_string: &str) -> bool {
        ConnectionParams::from_str(connection_string).is_ok()
    }
}

impl Default for Driver {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Driver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} v{} ({})", self.name, self.version, self.vendor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::QueryMode;
    use crate::error::ConnectionError;

    #[test]
    fn test_driver_creation() {
        let driver = Driver::new();
        assert_eq!(driver.name(), "openmldb");
        assert_eq!(driver.vendor(), "openmldb-rs contributors");
        assert!(!driver.version().is_empty());
        assert!(!driver.description().is_empty());
        assert_eq!(Driver::default(), driver);
    }

    #[test]
    fn test_driver_display() {
        let display = format!("{}", Driver::new());
        assert!(display.starts_with("openmldb v"));
        assert!(display.contains("contributors"));
    }

    #[tokio::test]
    async fn test_driver_open_valid() {
        let driver = Driver::new();
        let conn = driver
            .open("openmldb://127.0.0.1:8080/test_db?mode=offsync")
            .unwrap();
        assert_eq!(conn.host(), "127.0.0.1:8080");
        assert_eq!(conn.database(), "test_db");
        assert_eq!(conn.mode(), QueryMode::OffSync);
        assert!(conn.is_valid());
    }

    #[tokio::test]
    async fn test_driver_open_without_scheme() {
        let conn = Driver::new().open("//127.0.0.1:8080/test_db").unwrap();
        assert_eq!(conn.mode(), QueryMode::Online);
    }

    #[test]
    fn test_driver_open_invalid() {
        let driver = Driver::new();
        assert!(matches!(
            driver.open("openmldb://127.0.0.1:8080"),
            Err(OpenMldbError::Connection(ConnectionError::MissingDatabase))
        ));
        assert!(matches!(
            driver.open("openmldb://127.0.0.1:8080/db?mode=ONLINE"),
            Err(OpenMldbError::Connection(ConnectionError::InvalidMode(_)))
        ));
        assert!(matches!(
            driver.open("http://127.0.0.1:8080/db"),
            Err(OpenMldbError::Connection(ConnectionError::UnknownScheme(_)))
        ));
    }

    #[test]
    fn test_driver_open_connector() {
        let connector = Driver::new()
            .open_connector("openmldb://127.0.0.1:8080/test_db")
            .unwrap();
        assert_eq!(connector.params().database, "test_db");
        assert_eq!(connector.driver().name(), DRIVER_NAME);
    }

    #[test]
    fn test_validate_connection_string() {
        let driver = Driver::new();
        assert!(driver.validate_connection_string("openmldb://host/db"));
        assert!(driver.validate_connection_string("//host:1/db?mode=offasync"));
        assert!(!driver.validate_connection_string("openmldb://host/"));
        assert!(!driver.validate_connection_string("openmldb://host/db?mode=nearline"));
    }

    #[test]
    fn test_register_default() {
        let registry = DriverRegistry::new();
        assert!(Driver::register_default(&registry));
        assert!(!Driver::register_default(&registry));
        assert_eq!(registry.names(), vec![DRIVER_NAME.to_string()]);
    }
}
