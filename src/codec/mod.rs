//! Wire codec between typed values and the API server's JSON bodies.
//!
//! Encoding derives one type tag per parameter from its value and is pure.
//! Decoding parses a response document and re-types every column value
//! according to the response schema.
//!
//! # Example
//!
//! ```
//! use openmldb_rs::codec::{decode_response, encode_request};
//! use openmldb_rs::connection::QueryMode;
//! use openmldb_rs::types::Value;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let body = encode_request(QueryMode::Online, "SELECT c1 FROM t WHERE c1 = ?", &[Value::from(1i32)])?;
//! assert!(String::from_utf8(body)?.contains(r#""schema":["int32"]"#));
//!
//! let resp = decode_response(
//!     r#"{"code":0,"msg":"ok","data":{"schema":["int32"],"data":[[1]]}}"#.as_bytes(),
//! )?;
//! assert_eq!(resp.data.unwrap().rows[0][0], Value::from(1i32));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod decode;
pub mod encode;

pub use decode::{decode_response, QueryResponse, ResultData};
pub use encode::{encode_request, parameter_schema};
