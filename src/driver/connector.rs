//! Connector implementation.
//!
//! A `Connector` holds parsed connection parameters and hands out
//! connections that have already answered a ping.

use crate::connection::ConnectionParams;
use crate::driver::{Connection, Driver};
use crate::error::OpenMldbError;
use crate::transport::TransportProtocol;
use log::debug;
use std::sync::Arc;

/// Factory for verified connections.
///
/// # Example
///
/// ```no_run
/// use openmldb_rs::driver::Driver;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let connector = Driver::new().open_connector("openmldb://localhost:9527/demo_db")?;
/// let connection = connector.connect().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Connector {
    driver: Driver,
    params: ConnectionParams,
    /// Shared transport; a fresh HTTP transport per connection when unset
    transport: Option<Arc<dyn TransportProtocol>>,
}

impl std::fmt::Debug for Connector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connector")
            .field("driver", &self.driver)
            .field("params", &self.params)
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

impl Connector {
    /// Create a connector for `params`.
    pub fn new(driver: Driver, params: ConnectionParams) -> Self {
        Self {
            driver,
            params,
            transport: None,
        }
    }

    /// Use `transport` for every connection this connector creates.
    pub fn with_transport(mut self, transport: Arc<dyn TransportProtocol>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// The driver that created this connector.
    pub fn driver(&self) -> &Driver {
        &self.driver
    }

    /// Get the connection parameters.
    pub fn params(&self) -> &ConnectionParams {
        &self.params
    }

    /// Create a connection and ping it.
    ///
    /// # Errors
    ///
    /// Returns the ping's error if the server is unreachable or rejects the
    /// no-op query. No connection is returned in that case.
    pub async fn connect(&self) -> Result<Connection, OpenMldbError> {
        let connection = match &self.transport {
            Some(transport) => Connection::with_transport(self.params.clone(), Arc::clone(transport)),
            None => Connection::from_params(self.params.clone())?,
        };

        connection.ping().await?;

        debug!("Connected to {}", self.params.endpoint());
        Ok(connection)
    }
}
