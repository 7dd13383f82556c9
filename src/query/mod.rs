//! Query results.
//!
//! Statements are executed through [`crate::driver::Connection`]; this
//! module holds what comes back.

pub mod results;

pub use results::{QueryResult, Rows};
