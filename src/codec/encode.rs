//! Request encoding.

use crate::connection::QueryMode;
use crate::error::{OpenMldbError, QueryError, TransportError};
use crate::transport::messages::{QueryInput, QueryRequest};
use crate::types::{SqlType, Value};

/// Derive one type tag per parameter.
///
/// # Errors
///
/// Returns `QueryError::ParameterBindingError` naming the first parameter
/// that is an untyped null or a non-finite float.
pub fn parameter_schema(params: &[Value]) -> Result<Vec<SqlType>, QueryError> {
    params
        .iter()
        .enumerate()
        .map(|(index, value)| match value {
            Value::Valid(scalar) if scalar.is_non_finite() => {
                Err(QueryError::ParameterBindingError {
                    index,
                    message: "NaN and Infinity are not supported".to_string(),
                })
            }
            Value::Valid(scalar) => Ok(scalar.sql_type()),
            Value::Null(sql_type) => Ok(*sql_type),
            Value::UntypedNull => Err(QueryError::ParameterBindingError {
                index,
                message: "cannot infer SQL type of an untyped null".to_string(),
            }),
        })
        .collect()
}

/// Encode a statement and its parameters into a JSON request body.
///
/// The `input` member is omitted entirely when `params` is empty. Nothing is
/// produced if any parameter fails to encode.
pub fn encode_request(
    mode: QueryMode,
    sql: &str,
    params: &[Value],
) -> Result<Vec<u8>, OpenMldbError> {
    let mut request = QueryRequest::new(mode, sql);

    if !params.is_empty() {
        let schema = parameter_schema(params)?;
        request = request.with_input(QueryInput {
            schema,
            data: params,
        });
    }

    serde_json::to_vec(&request)
        .map_err(|e| TransportError::SerializationError(e.to_string()).into())
}
