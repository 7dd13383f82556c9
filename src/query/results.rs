//! Result set handling and iteration.
//!
//! This module provides the forward-only row cursor returned by statements
//! that produce rows, and the result type that distinguishes those from
//! statements that produce none.

use crate::codec::ResultData;
use crate::error::QueryError;
use crate::types::{SqlType, Value};

/// Outcome of executing one statement.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// The statement produced a result set
    Rows(Rows),
    /// The statement produced no rows (DDL, DML)
    NoRows,
}

impl QueryResult {
    /// Check if this carries rows.
    pub fn is_rows(&self) -> bool {
        matches!(self, Self::Rows(_))
    }

    /// Take the rows, if any.
    pub fn into_rows(self) -> Option<Rows> {
        match self {
            Self::Rows(rows) => Some(rows),
            Self::NoRows => None,
        }
    }
}

impl From<Option<ResultData>> for QueryResult {
    fn from(data: Option<ResultData>) -> Self {
        match data {
            Some(data) => Self::Rows(Rows::new(data)),
            None => Self::NoRows,
        }
    }
}

/// Forward-only cursor over a materialized result set.
///
/// Rows are handed out in server order. Once exhausted or closed the cursor
/// keeps reporting end-of-data.
#[derive(Debug, Clone, PartialEq)]
pub struct Rows {
    schema: Vec<SqlType>,
    rows: Vec<Vec<Value>>,
    cursor: usize,
}

impl Rows {
    /// Create a cursor positioned before the first row.
    pub fn new(data: ResultData) -> Self {
        Self {
            schema: data.schema,
            rows: data.rows,
            cursor: 0,
        }
    }

    /// Column names.
    ///
    /// The wire format carries type tags but no names, so every entry is
    /// empty. Only the length is meaningful.
    pub fn columns(&self) -> Vec<String> {
        vec![String::new(); self.schema.len()]
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    /// Column types.
    pub fn column_types(&self) -> &[SqlType] {
        &self.schema
    }

    /// Rows not yet consumed.
    pub fn remaining(&self) -> usize {
        self.rows.len().saturating_sub(self.cursor)
    }

    /// Check if the cursor is exhausted.
    pub fn is_closed(&self) -> bool {
        self.cursor >= self.rows.len()
    }

    /// Copy the next row into `dest` and advance.
    ///
    /// Returns `Ok(false)` at end of data, leaving `dest` untouched.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::InvalidState` if `dest` is not exactly
    /// [`column_count`](Self::column_count) long.
    pub fn next_row(&mut self, dest: &mut [Value]) -> Result<bool, QueryError> {
        let Some(row) = self.rows.get(self.cursor) else {
            return Ok(false);
        };
        if dest.len() != row.len() {
            return Err(QueryError::InvalidState(format!(
                "destination holds {} values, row has {} columns",
                dest.len(),
                row.len()
            )));
        }

        dest.clone_from_slice(row);
        self.cursor += 1;
        Ok(true)
    }

    /// Mark the cursor exhausted. Idempotent.
    pub fn close(&mut self) {
        self.cursor = self.rows.len();
    }
}

impl Iterator for Rows {
    type Item = Vec<Value>;

    fn next(&mut self) -> Option<Self::Item> {
        let row = self.rows.get_mut(self.cursor)?;
        self.cursor += 1;
        Some(std::mem::take(row))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}
