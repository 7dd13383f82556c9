//! SQL type tags and the typed value model.

mod mapping;
mod value;

pub use mapping::SqlType;
pub use value::{Scalar, Value, DATE_FORMAT};
