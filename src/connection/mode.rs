//! Query execution modes understood by the API server.

use crate::error::ConnectionError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Execution context sent with every request.
///
/// Accepts both vocabularies the API server has used: `offline`, and the
/// split `offsync`/`offasync` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum QueryMode {
    /// Online (request-serving) execution
    #[default]
    Online,
    /// Offline execution
    Offline,
    /// Offline execution, waiting for the job to finish
    OffSync,
    /// Offline execution, returning once the job is submitted
    OffAsync,
}

impl QueryMode {
    pub const ALL: [QueryMode; 4] = [
        QueryMode::Online,
        QueryMode::Offline,
        QueryMode::OffSync,
        QueryMode::OffAsync,
    ];

    /// Wire name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryMode::Online => "online",
            QueryMode::Offline => "offline",
            QueryMode::OffSync => "offsync",
            QueryMode::OffAsync => "offasync",
        }
    }
}

impl FromStr for QueryMode {
    type Err = ConnectionError;

    /// Parse a mode name. Matching is exact: `Online` is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| ConnectionError::InvalidMode(s.to_string()))
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for QueryMode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
