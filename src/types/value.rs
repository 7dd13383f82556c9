//! Typed parameter and column values.
//!
//! A [`Value`] is either a valid [`Scalar`], a null that still knows its SQL
//! type, or an untyped null. Untyped nulls can be carried around but are
//! rejected when encoded as a statement parameter, since the server needs a
//! type tag for every parameter.

use super::SqlType;
use crate::error::ConversionError;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Serialize, Serializer};

/// Wire format of `date` values.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A non-null value of one of the supported SQL types.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Bool(bool),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    String(String),
    /// Absolute instant, millisecond precision on the wire
    Timestamp(DateTime<Utc>),
    /// Calendar day
    Date(NaiveDate),
}

impl Scalar {
    /// The type tag this scalar is sent with.
    pub fn sql_type(&self) -> SqlType {
        match self {
            Scalar::Bool(_) => SqlType::Bool,
            Scalar::Int16(_) => SqlType::Int16,
            Scalar::Int32(_) => SqlType::Int32,
            Scalar::Int64(_) => SqlType::Int64,
            Scalar::Float(_) => SqlType::Float,
            Scalar::Double(_) => SqlType::Double,
            Scalar::String(_) => SqlType::String,
            Scalar::Timestamp(_) => SqlType::Timestamp,
            Scalar::Date(_) => SqlType::Date,
        }
    }

    /// Whether this is a NaN or infinite float, which JSON cannot carry.
    pub(crate) fn is_non_finite(&self) -> bool {
        match self {
            Scalar::Float(f) => !f.is_finite(),
            Scalar::Double(f) => !f.is_finite(),
            _ => false,
        }
    }
}

/// An explicitly nullable value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A non-null value
    Valid(Scalar),
    /// A null of a known SQL type
    Null(SqlType),
    /// A null with no type information
    UntypedNull,
}

impl Value {
    /// Create a typed null.
    pub fn null(sql_type: SqlType) -> Self {
        Value::Null(sql_type)
    }

    /// The SQL type, if known.
    ///
    /// A typed null reports its declared type regardless of validity.
    pub fn sql_type(&self) -> Option<SqlType> {
        match self {
            Value::Valid(scalar) => Some(scalar.sql_type()),
            Value::Null(sql_type) => Some(*sql_type),
            Value::UntypedNull => None,
        }
    }

    /// Check whether this value is null, typed or not.
    pub fn is_null(&self) -> bool {
        !matches!(self, Value::Valid(_))
    }

    /// The inner scalar for a valid value.
    pub fn as_scalar(&self) -> Option<&Scalar> {
        match self {
            Value::Valid(scalar) => Some(scalar),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self.as_scalar()? {
            Scalar::Bool(v) => Some(*v),
            _ => None,
        }
    }

    /// Integer content widened to `i64`, for any of the integer widths.
    pub fn as_i64(&self) -> Option<i64> {
        match self.as_scalar()? {
            Scalar::Int16(v) => Some(i64::from(*v)),
            Scalar::Int32(v) => Some(i64::from(*v)),
            Scalar::Int64(v) => Some(*v),
            _ => None,
        }
    }

    /// Float content widened to `f64`, for either float width.
    pub fn as_f64(&self) -> Option<f64> {
        match self.as_scalar()? {
            Scalar::Float(v) => Some(f64::from(*v)),
            Scalar::Double(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self.as_scalar()? {
            Scalar::String(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<DateTime<Utc>> {
        match self.as_scalar()? {
            Scalar::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self.as_scalar()? {
            Scalar::Date(v) => Some(*v),
            _ => None,
        }
    }

    /// Decode a raw JSON column value under the column's declared type.
    ///
    /// JSON null becomes a typed null without touching the conversion rules.
    /// `row` and `column` only locate errors.
    pub fn from_wire(
        sql_type: SqlType,
        raw: &serde_json::Value,
        row: usize,
        column: usize,
    ) -> Result<Self, ConversionError> {
        if raw.is_null() {
            return Ok(Value::Null(sql_type));
        }

        let mismatch = |expected: &str| ConversionError::ValueConversionFailed {
            row,
            column,
            message: format!("expected {} for {} column, got {}", expected, sql_type, raw),
        };
        let overflow = || ConversionError::NumericOverflow { row, column };

        let scalar = match sql_type {
            SqlType::Bool => Scalar::Bool(raw.as_bool().ok_or_else(|| mismatch("boolean"))?),
            SqlType::Int16 => {
                let v = integral(raw, row, column)?.ok_or_else(|| mismatch("integer"))?;
                Scalar::Int16(i16::try_from(v).map_err(|_| overflow())?)
            }
            SqlType::Int32 => {
                let v = integral(raw, row, column)?.ok_or_else(|| mismatch("integer"))?;
                Scalar::Int32(i32::try_from(v).map_err(|_| overflow())?)
            }
            SqlType::Int64 => {
                Scalar::Int64(integral(raw, row, column)?.ok_or_else(|| mismatch("integer"))?)
            }
            SqlType::Float => Scalar::Float(raw.as_f64().ok_or_else(|| mismatch("number"))? as f32),
            SqlType::Double => Scalar::Double(raw.as_f64().ok_or_else(|| mismatch("number"))?),
            SqlType::String => {
                Scalar::String(raw.as_str().ok_or_else(|| mismatch("string"))?.to_string())
            }
            SqlType::Timestamp => {
                let millis = integral(raw, row, column)?.ok_or_else(|| mismatch("integer"))?;
                Scalar::Timestamp(DateTime::from_timestamp_millis(millis).ok_or_else(overflow)?)
            }
            SqlType::Date => {
                let text = raw.as_str().ok_or_else(|| mismatch("string"))?;
                let date = parse_date(text).ok_or_else(|| ConversionError::InvalidDate {
                    row,
                    column,
                    value: text.to_string(),
                })?;
                Scalar::Date(date)
            }
        };

        Ok(Value::Valid(scalar))
    }
}

/// Parse strict `YYYY-MM-DD` text.
///
/// chrono alone accepts unpadded fields, leading whitespace and a signed year.
fn parse_date(text: &str) -> Option<NaiveDate> {
    let bytes = text.as_bytes();
    let well_formed = bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        });
    if !well_formed {
        return None;
    }
    NaiveDate::parse_from_str(text, DATE_FORMAT).ok()
}

/// Read a JSON number as an `i64`, accepting integral floats such as `1.0`.
///
/// Returns `Ok(None)` when the value is not a number at all.
fn integral(
    raw: &serde_json::Value,
    row: usize,
    column: usize,
) -> Result<Option<i64>, ConversionError> {
    let serde_json::Value::Number(number) = raw else {
        return Ok(None);
    };
    if let Some(v) = number.as_i64() {
        return Ok(Some(v));
    }
    if number.is_u64() {
        return Err(ConversionError::NumericOverflow { row, column });
    }
    match number.as_f64() {
        Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f < i64::MAX as f64 => {
            Ok(Some(f as i64))
        }
        Some(f) if f.fract() == 0.0 => Err(ConversionError::NumericOverflow { row, column }),
        _ => Err(ConversionError::ValueConversionFailed {
            row,
            column,
            message: format!("expected integral number, got {}", number),
        }),
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Valid(Scalar::Bool(v)) => serializer.serialize_bool(*v),
            Value::Valid(Scalar::Int16(v)) => serializer.serialize_i16(*v),
            Value::Valid(Scalar::Int32(v)) => serializer.serialize_i32(*v),
            Value::Valid(Scalar::Int64(v)) => serializer.serialize_i64(*v),
            Value::Valid(Scalar::Float(v)) => serializer.serialize_f32(*v),
            Value::Valid(Scalar::Double(v)) => serializer.serialize_f64(*v),
            Value::Valid(Scalar::String(v)) => serializer.serialize_str(v),
            Value::Valid(Scalar::Timestamp(v)) => serializer.serialize_i64(v.timestamp_millis()),
            Value::Valid(Scalar::Date(v)) => {
                serializer.serialize_str(&v.format(DATE_FORMAT).to_string())
            }
            Value::Null(_) | Value::UntypedNull => serializer.serialize_none(),
        }
    }
}

impl From<Scalar> for Value {
    fn from(scalar: Scalar) -> Self {
        Value::Valid(scalar)
    }
}

macro_rules! impl_from_native {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Valid(Scalar::$variant(v.into()))
                }
            }

            impl From<Option<$ty>> for Value {
                fn from(v: Option<$ty>) -> Self {
                    match v {
                        Some(v) => Value::from(v),
                        None => Value::Null(SqlType::$variant),
                    }
                }
            }
        )*
    };
}

impl_from_native! {
    bool => Bool,
    i16 => Int16,
    i32 => Int32,
    i64 => Int64,
    f32 => Float,
    f64 => Double,
    String => String,
    &str => String,
    DateTime<Utc> => Timestamp,
    NaiveDate => Date,
}
