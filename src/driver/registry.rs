//! Named driver registry.
//!
//! Host applications create one registry during start-up and register the
//! drivers they want reachable by name.

use crate::driver::{Connection, Connector, Driver};
use crate::error::{ConnectionError, OpenMldbError};
use log::debug;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

/// Thread-safe map from driver name to driver.
///
/// # Example
///
/// ```
/// use openmldb_rs::driver::{Driver, DriverRegistry};
///
/// let registry = DriverRegistry::new();
/// assert!(Driver::register_default(&registry));
/// assert!(registry.driver("openmldb").is_some());
/// ```
#[derive(Debug, Default)]
pub struct DriverRegistry {
    drivers: RwLock<HashMap<String, Driver>>,
}

impl DriverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `driver` under `name`.
    ///
    /// Returns `false` and leaves the existing entry in place if `name` is
    /// already registered.
    pub fn register(&self, name: &str, driver: Driver) -> bool {
        let mut drivers = self.drivers.write().unwrap_or_else(PoisonError::into_inner);
        if drivers.contains_key(name) {
            return false;
        }
        debug!("Registered driver '{}': {}", name, driver);
        drivers.insert(name.to_string(), driver);
        true
    }

    /// Look up a driver by name.
    pub fn driver(&self, name: &str) -> Option<Driver> {
        self.drivers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .drivers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        names.sort();
        names
    }

    /// Open an unverified connection through the driver named `name`.
    ///
    /// # Errors
    ///
    /// Returns `ConnectionError::DriverNotFound` for an unknown name, or
    /// whatever [`Driver::open`] returns.
    pub fn open(&self, name: &str, connection_string: &str) -> Result<Connection, OpenMldbError> {
        self.lookup(name)?.open(connection_string)
    }

    /// Create a connector through the driver named `name`.
    pub fn open_connector(
        &self,
        name: &str,
        connection_string: &str,
    ) -> Result<Connector, OpenMldbError> {
        self.lookup(name)?.open_connector(connection_string)
    }

    fn lookup(&self, name: &str) -> Result<Driver, ConnectionError> {
        self.driver(name)
            .ok_or_else(|| ConnectionError::DriverNotFound(name.to_string()))
    }
}
