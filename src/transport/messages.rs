//! JSON message types for the API server's `/dbs/{database}` endpoint.
//!
//! Requests borrow from the caller; responses are parsed structurally here
//! and materialized into typed rows by [`crate::codec`].

use crate::connection::QueryMode;
use crate::types::{SqlType, Value};
use serde::{Deserialize, Serialize};

/// Statement execution request.
#[derive(Debug, Clone, Serialize)]
pub struct QueryRequest<'a> {
    /// Execution mode
    pub mode: QueryMode,
    /// SQL text to execute
    pub sql: &'a str,
    /// Bound parameters, omitted when there are none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<QueryInput<'a>>,
}

impl<'a> QueryRequest<'a> {
    /// Create a request without parameters.
    pub fn new(mode: QueryMode, sql: &'a str) -> Self {
        Self {
            mode,
            sql,
            input: None,
        }
    }

    /// Attach bound parameters.
    pub fn with_input(mut self, input: QueryInput<'a>) -> Self {
        self.input = Some(input);
        self
    }
}

/// Bound parameters: one type tag per value, index-aligned.
#[derive(Debug, Clone, Serialize)]
pub struct QueryInput<'a> {
    pub schema: Vec<SqlType>,
    pub data: &'a [Value],
}

/// Statement execution response as sent by the server.
///
/// Column values are still raw JSON; `schema` entries are unvalidated tags.
#[derive(Debug, Clone, Deserialize)]
pub struct RawQueryResponse {
    /// Status code, 0 on success
    pub code: i64,
    /// Human-readable status message
    #[serde(default)]
    pub msg: String,
    /// Result rows, absent for statements that produce none
    #[serde(default)]
    pub data: Option<RawResultData>,
}

/// Result rows as sent by the server.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResultData {
    /// Column type tags
    pub schema: Vec<String>,
    /// Row-major values
    #[serde(default)]
    pub data: Vec<Vec<serde_json::Value>>,
}
