//! Error types for openmldb-rs.
//!
//! This module defines domain-specific error types organized by functional area.

use std::fmt;
use thiserror::Error;

/// Top-level error type encompassing all possible errors.
#[derive(Error, Debug)]
pub enum OpenMldbError {
    /// Connection string and connection state errors
    #[error(transparent)]
    Connection(#[from] ConnectionError),

    /// Parameter encoding, server-reported and unsupported-operation errors
    #[error(transparent)]
    Query(#[from] QueryError),

    /// Response value decoding errors
    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// HTTP transport errors
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Errors related to connection strings and connection state.
#[derive(Error, Debug)]
pub enum ConnectionError {
    /// Connection string parsing error
    #[error("Failed to parse connection string: {0}")]
    ParseError(String),

    /// Scheme is neither empty nor the registered driver name
    #[error("Invalid connection string: unknown scheme '{0}'")]
    UnknownScheme(String),

    /// No database name in the connection string path
    #[error("Invalid connection string: database name not found")]
    MissingDatabase,

    /// Unrecognized query mode
    #[error("Invalid mode: {0}")]
    InvalidMode(String),

    /// Invalid connection parameters
    #[error("Invalid connection parameter '{parameter}': {message}")]
    InvalidParameter { parameter: String, message: String },

    /// Connection is closed
    #[error("Connection is closed")]
    ConnectionClosed,

    /// No driver registered under the requested name
    #[error("No driver registered under '{0}'")]
    DriverNotFound(String),
}

/// Errors related to statement execution.
#[derive(Error, Debug)]
pub enum QueryError {
    /// Parameter binding error
    #[error("Parameter binding error for parameter {index}: {message}")]
    ParameterBindingError { index: usize, message: String },

    /// Non-zero status code reported by the API server
    #[error("execute error: {message}")]
    ServerError { code: i64, message: String },

    /// Operation intentionally not supported by this driver
    #[error("{0} is not implemented")]
    NotImplemented(String),

    /// Invalid query state
    #[error("Invalid query state: {0}")]
    InvalidState(String),
}

/// Errors related to data type conversion.
#[derive(Error, Debug)]
pub enum ConversionError {
    /// Unrecognized column type tag
    #[error("Unsupported type '{type_name}' at index {column}")]
    UnsupportedType { column: usize, type_name: String },

    /// Failed to convert value
    #[error("Failed to convert value at row {row}, column {column}: {message}")]
    ValueConversionFailed {
        row: usize,
        column: usize,
        message: String,
    },

    /// Overflow during conversion
    #[error("Numeric overflow at row {row}, column {column}")]
    NumericOverflow { row: usize, column: usize },

    /// Date text that is not `YYYY-MM-DD`
    #[error("Invalid date '{value}' at row {row}, column {column}")]
    InvalidDate {
        row: usize,
        column: usize,
        value: String,
    },

    /// Schema mismatch
    #[error("Schema mismatch: {0}")]
    SchemaMismatch(String),
}

/// Errors related to the HTTP transport.
#[derive(Error, Debug)]
pub enum TransportError {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Could not reach the API server
    #[error("Failed to connect: {0}")]
    ConnectFailed(String),

    /// Non-success HTTP status with an undecodable body
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Request did not complete in time
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// Request aborted by the caller
    #[error("Request cancelled")]
    Cancelled,

    /// Message serialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Message deserialization error
    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

/// Error tiers reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed connection string or configuration
    Configuration = 0,
    /// Unsupported or ambiguous bound parameter
    Encode = 1,
    /// Network failure, malformed body, timeout or abort
    Transport = 2,
    /// Non-zero status code from the server
    Server = 3,
    /// Response values that cannot be materialized
    Decode = 4,
    /// Closed connection or unimplemented operation
    State = 5,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Configuration => write!(f, "CONFIGURATION"),
            ErrorCategory::Encode => write!(f, "ENCODE"),
            ErrorCategory::Transport => write!(f, "TRANSPORT"),
            ErrorCategory::Server => write!(f, "SERVER"),
            ErrorCategory::Decode => write!(f, "DECODE"),
            ErrorCategory::State => write!(f, "STATE"),
        }
    }
}

impl OpenMldbError {
    /// Map to the error tier.
    pub fn category(&self) -> ErrorCategory {
        match self {
            OpenMldbError::Connection(e) => e.category(),
            OpenMldbError::Query(e) => e.category(),
            OpenMldbError::Conversion(_) => ErrorCategory::Decode,
            OpenMldbError::Transport(_) => ErrorCategory::Transport,
        }
    }

    /// Whether a connection pool should discard the connection that produced this error.
    pub fn is_bad_connection(&self) -> bool {
        matches!(
            self,
            OpenMldbError::Connection(ConnectionError::ConnectionClosed)
        )
    }
}

impl ConnectionError {
    /// Map to the error tier.
    pub fn category(&self) -> ErrorCategory {
        match self {
            ConnectionError::ConnectionClosed => ErrorCategory::State,
            _ => ErrorCategory::Configuration,
        }
    }
}

impl QueryError {
    /// Map to the error tier.
    pub fn category(&self) -> ErrorCategory {
        match self {
            QueryError::ParameterBindingError { .. } => ErrorCategory::Encode,
            QueryError::ServerError { .. } => ErrorCategory::Server,
            QueryError::NotImplemented(_) | QueryError::InvalidState(_) => ErrorCategory::State,
        }
    }
}

// Conversions from external error types
impl From<serde_json::Error> for TransportError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_io() {
            TransportError::HttpError(err.to_string())
        } else {
            TransportError::DeserializationError(err.to_string())
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            TransportError::ConnectFailed(err.to_string())
        } else {
            TransportError::HttpError(err.to_string())
        }
    }
}
