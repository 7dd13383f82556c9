//! Response decoding.

use std::io::Read;

use crate::error::{ConversionError, OpenMldbError, QueryError, TransportError};
use crate::transport::messages::{RawQueryResponse, RawResultData};
use crate::types::{SqlType, Value};

/// Decoded statement execution response.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse {
    /// Status code, 0 on success
    pub code: i64,
    /// Human-readable status message
    pub msg: String,
    /// Typed result rows, absent for statements that produce none
    pub data: Option<ResultData>,
}

impl QueryResponse {
    /// Check for a zero status code.
    pub fn is_success(&self) -> bool {
        self.code == 0
    }

    /// Turn a non-zero status code into a server error.
    ///
    /// # Errors
    ///
    /// Returns `QueryError::ServerError` carrying `msg` verbatim.
    pub fn into_result(self) -> Result<Option<ResultData>, QueryError> {
        if self.is_success() {
            Ok(self.data)
        } else {
            Err(QueryError::ServerError {
                code: self.code,
                message: self.msg,
            })
        }
    }
}

/// Typed, rectangular result set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ResultData {
    /// Column types
    pub schema: Vec<SqlType>,
    /// Rows; every row has `schema.len()` values
    pub rows: Vec<Vec<Value>>,
}

impl ResultData {
    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.schema.len()
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

/// Decode one JSON response document from `reader`.
///
/// Rows are only materialized for successful responses that carry data;
/// error responses keep their code and message and drop any data.
///
/// # Errors
///
/// - `TransportError::DeserializationError` if the body is not a well-formed
///   response document
/// - `ConversionError` if a column tag is unknown or a value cannot be
///   converted to its column type
pub fn decode_response<R: Read>(reader: R) -> Result<QueryResponse, OpenMldbError> {
    let raw: RawQueryResponse = serde_json::from_reader(reader).map_err(TransportError::from)?;

    let data = match raw.data {
        Some(data) if raw.code == 0 => Some(materialize(data)?),
        _ => None,
    };

    Ok(QueryResponse {
        code: raw.code,
        msg: raw.msg,
        data,
    })
}

/// Re-type every raw column value according to its schema tag.
pub(crate) fn materialize(raw: RawResultData) -> Result<ResultData, ConversionError> {
    let schema = raw
        .schema
        .iter()
        .enumerate()
        .map(|(column, tag)| {
            SqlType::from_tag(tag).ok_or_else(|| ConversionError::UnsupportedType {
                column,
                type_name: tag.clone(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut rows = Vec::with_capacity(raw.data.len());
    for (row_idx, raw_row) in raw.data.iter().enumerate() {
        if raw_row.len() != schema.len() {
            return Err(ConversionError::SchemaMismatch(format!(
                "row {} has {} columns, schema has {}",
                row_idx,
                raw_row.len(),
                schema.len()
            )));
        }

        let row = raw_row
            .iter()
            .zip(&schema)
            .enumerate()
            .map(|(col_idx, (raw_value, sql_type))| {
                Value::from_wire(*sql_type, raw_value, row_idx, col_idx)
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(row);
    }

    Ok(ResultData { schema, rows })
}
