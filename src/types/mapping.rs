//! Wire type tags exchanged with the API server.

use serde::{Serialize, Serializer};
use std::fmt;

/// SQL type tag as it appears in request and response schemas.
///
/// Tags are matched case-insensitively when read from a response and always
/// written in lower case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
    /// `bool`
    Bool,
    /// `int16`
    Int16,
    /// `int32`
    Int32,
    /// `int64`
    Int64,
    /// `float` (32-bit)
    Float,
    /// `double` (64-bit)
    Double,
    /// `string`
    String,
    /// `timestamp`, milliseconds since the Unix epoch on the wire
    Timestamp,
    /// `date`, `YYYY-MM-DD` text on the wire
    Date,
}

impl SqlType {
    /// Every supported tag, in wire-name order.
    pub const ALL: [SqlType; 9] = [
        SqlType::Bool,
        SqlType::Int16,
        SqlType::Int32,
        SqlType::Int64,
        SqlType::Float,
        SqlType::Double,
        SqlType::String,
        SqlType::Timestamp,
        SqlType::Date,
    ];

    /// Canonical lower-case wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            SqlType::Bool => "bool",
            SqlType::Int16 => "int16",
            SqlType::Int32 => "int32",
            SqlType::Int64 => "int64",
            SqlType::Float => "float",
            SqlType::Double => "double",
            SqlType::String => "string",
            SqlType::Timestamp => "timestamp",
            SqlType::Date => "date",
        }
    }

    /// Look up a tag by name, ignoring ASCII case.
    ///
    /// Returns `None` for unrecognized names; the caller decides which column
    /// to blame.
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(tag))
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SqlType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}
