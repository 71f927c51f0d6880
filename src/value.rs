//! Typed field values.
//!
//! [`Value`] is the closed set of value types a point field can carry. Each variant
//! has one textual rendering, which is what ends up on the wire and what the
//! field's byte size is computed from.
//!
//! ## Creating Values
//!
//! ```rust
//! use pandora_points::Value;
//!
//! let status = Value::from(200);
//! let bytes = Value::from(1_048_576i64);
//! let ratio = Value::from(0.25);
//! let host = Value::from("web-01");
//! let tags = Value::array(&["edge", "cdn"]).unwrap();
//!
//! assert_eq!(status.to_string(), "200");
//! assert_eq!(ratio.to_string(), "0.25");
//! assert_eq!(tags.to_string(), r#"["edge","cdn"]"#);
//! ```
//!
//! ## Dates
//!
//! Any `chrono::DateTime` converts into the local system time zone when it becomes
//! a [`Value`]. Build [`Value::Date`] directly to pin a specific offset.
//!
//! ```rust
//! use chrono::{FixedOffset, TimeZone};
//! use pandora_points::Value;
//!
//! let tz = FixedOffset::east_opt(8 * 3600).unwrap();
//! let at = tz.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
//! assert_eq!(Value::Date(at).to_string(), "2024-01-15T10:30:00.000+08:00");
//! ```

use crate::{Error, Result};
use chrono::{DateTime, FixedOffset, Local, TimeZone};
use serde::Serialize;
use std::fmt;

const DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3f%:z";

/// A typed field value.
///
/// `Array` and `Map` hold the compact JSON encoding of the original collection;
/// build them with [`Value::array`] and [`Value::map`].
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    Int(i32),
    Long(i64),
    Double(f64),
    Float(f32),
    Bool(bool),
    Text(String),
    Date(DateTime<FixedOffset>),
    Array(String),
    Map(String),
}

impl Value {
    /// Encodes any serializable sequence as an `Array` value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `value` does not encode to a JSON array,
    /// or [`Error::Json`] if encoding fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pandora_points::Value;
    ///
    /// let value = Value::array(&vec![1, 2, 3]).unwrap();
    /// assert_eq!(value, Value::Array("[1,2,3]".to_string()));
    ///
    /// assert!(Value::array(&"not a list").is_err());
    /// ```
    pub fn array<T>(value: &T) -> Result<Self>
    where
        T: ?Sized + Serialize,
    {
        let json = serde_json::to_value(value)?;
        if !json.is_array() {
            return Err(Error::invalid_argument(format!(
                "expected a sequence, got {}",
                json_kind(&json)
            )));
        }
        Ok(Value::Array(json.to_string()))
    }

    /// Encodes any serializable mapping as a `Map` value.
    ///
    /// Keys must encode as strings or integers, as in JSON objects.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] if `value` does not encode to a JSON object,
    /// or [`Error::Json`] if encoding fails.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use indexmap::IndexMap;
    /// use pandora_points::Value;
    ///
    /// let mut headers = IndexMap::new();
    /// headers.insert("method", "GET");
    /// headers.insert("path", "/index.html");
    ///
    /// let value = Value::map(&headers).unwrap();
    /// assert_eq!(value.to_string(), r#"{"method":"GET","path":"/index.html"}"#);
    /// ```
    pub fn map<T>(value: &T) -> Result<Self>
    where
        T: ?Sized + Serialize,
    {
        let json = serde_json::to_value(value)?;
        if !json.is_object() {
            return Err(Error::invalid_argument(format!(
                "expected a mapping, got {}",
                json_kind(&json)
            )));
        }
        Ok(Value::Map(json.to_string()))
    }

    /// Returns the name of this value's type.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Long(_) => "long",
            Value::Double(_) => "double",
            Value::Float(_) => "float",
            Value::Bool(_) => "bool",
            Value::Text(_) => "text",
            Value::Date(_) => "date",
            Value::Array(_) => "array",
            Value::Map(_) => "map",
        }
    }

    /// Returns `true` if the value is text.
    #[inline]
    #[must_use]
    pub const fn is_text(&self) -> bool {
        matches!(self, Value::Text(_))
    }

    /// If the value is text, returns it. Otherwise returns `None`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pandora_points::Value;
    ///
    /// assert_eq!(Value::from("ok").as_str(), Some("ok"));
    /// assert_eq!(Value::from(1).as_str(), None);
    /// ```
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an `Array` or `Map`, returns its JSON text.
    #[must_use]
    pub fn as_json(&self) -> Option<&str> {
        match self {
            Value::Array(s) | Value::Map(s) => Some(s),
            _ => None,
        }
    }

    /// If the value is an integer, returns it widened to `i64`.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(i64::from(*i)),
            Value::Long(i) => Some(*i),
            _ => None,
        }
    }

    /// If the value is numeric, returns it as `f64`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pandora_points::Value;
    ///
    /// assert_eq!(Value::from(2).as_f64(), Some(2.0));
    /// assert_eq!(Value::from(0.5f32).as_f64(), Some(0.5));
    /// assert_eq!(Value::from(true).as_f64(), None);
    /// ```
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(f64::from(*i)),
            Value::Long(i) => Some(*i as f64),
            Value::Double(f) => Some(*f),
            Value::Float(f) => Some(f64::from(*f)),
            _ => None,
        }
    }

    /// If the value is a boolean, returns it.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

fn json_kind(json: &serde_json::Value) -> &'static str {
    match json {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a sequence",
        serde_json::Value::Object(_) => "a mapping",
    }
}

// Integral floats keep their decimal point so the ingesting side still sees a float.
fn write_float(f: &mut fmt::Formatter<'_>, v: f64, debug: &dyn fmt::Debug) -> fmt::Result {
    if v.is_nan() {
        f.write_str("NaN")
    } else if v == f64::INFINITY {
        f.write_str("Infinity")
    } else if v == f64::NEG_INFINITY {
        f.write_str("-Infinity")
    } else {
        write!(f, "{:?}", debug)
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(i) => write!(f, "{}", i),
            Value::Long(i) => write!(f, "{}", i),
            Value::Double(d) => write_float(f, *d, d),
            Value::Float(fl) => write_float(f, f64::from(*fl), fl),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Text(s) | Value::Array(s) | Value::Map(s) => f.write_str(s),
            Value::Date(dt) => write!(f, "{}", dt.format(DATE_FORMAT)),
        }
    }
}

impl From<i8> for Value {
    fn from(value: i8) -> Self {
        Value::Int(i32::from(value))
    }
}

impl From<i16> for Value {
    fn from(value: i16) -> Self {
        Value::Int(i32::from(value))
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Int(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Long(value)
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Value::Int(i32::from(value))
    }
}

impl From<u16> for Value {
    fn from(value: u16) -> Self {
        Value::Int(i32::from(value))
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Value::Long(i64::from(value))
    }
}

/// `Long` when the value fits in an `i64`, otherwise decimal `Text`.
impl From<u64> for Value {
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(v) => Value::Long(v),
            Err(_) => Value::Text(value.to_string()),
        }
    }
}

impl From<usize> for Value {
    fn from(value: usize) -> Self {
        Value::from(value as u64)
    }
}

impl From<f32> for Value {
    fn from(value: f32) -> Self {
        Value::Float(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Double(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<&String> for Value {
    fn from(value: &String) -> Self {
        Value::Text(value.clone())
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Value {
    fn from(value: DateTime<Tz>) -> Self {
        Value::Date(value.with_timezone(&Local).fixed_offset())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use indexmap::IndexMap;

    #[test]
    fn test_integer_rendering() {
        assert_eq!(Value::from(-42).to_string(), "-42");
        assert_eq!(Value::from(i64::MAX).to_string(), "9223372036854775807");
        assert_eq!(Value::from(7u8), Value::Int(7));
        assert_eq!(Value::from(7u32), Value::Long(7));
    }

    #[test]
    fn test_unsigned_wide_integers() {
        assert_eq!(Value::from(7u64), Value::Long(7));
        assert_eq!(Value::from(i64::MAX as u64), Value::Long(i64::MAX));
        assert_eq!(
            Value::from(u64::MAX),
            Value::Text("18446744073709551615".to_string())
        );
        assert_eq!(Value::from("abc".len()), Value::Long(3));
    }

    #[test]
    fn test_float_rendering_keeps_decimal_point() {
        assert_eq!(Value::from(1.0).to_string(), "1.0");
        assert_eq!(Value::from(3.25).to_string(), "3.25");
        assert_eq!(Value::from(0.1f32).to_string(), "0.1");
        assert_eq!(Value::from(-2.0f32).to_string(), "-2.0");
    }

    #[test]
    fn test_special_floats() {
        assert_eq!(Value::from(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(Value::from(f64::NEG_INFINITY).to_string(), "-Infinity");
        assert_eq!(Value::from(f32::NAN).to_string(), "NaN");
    }

    #[test]
    fn test_bool_rendering() {
        assert_eq!(Value::from(true).to_string(), "true");
        assert_eq!(Value::from(false).to_string(), "false");
    }

    #[test]
    fn test_date_pins_given_offset() {
        let tz = FixedOffset::west_opt(5 * 3600).unwrap();
        let at = tz
            .with_ymd_and_hms(2023, 12, 31, 23, 59, 59)
            .unwrap()
            .checked_add_signed(chrono::Duration::milliseconds(7))
            .unwrap();
        assert_eq!(
            Value::Date(at).to_string(),
            "2023-12-31T23:59:59.007-05:00"
        );
    }

    #[test]
    fn test_utc_offset_is_numeric() {
        let at = FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 1, 0, 0, 0)
            .unwrap();
        assert_eq!(Value::Date(at).to_string(), "2024-06-01T00:00:00.000+00:00");
    }

    #[test]
    fn test_date_conversion_keeps_instant() {
        let now = Utc::now();
        let value = Value::from(now);
        let rendered = value.to_string();
        let parsed = DateTime::parse_from_rfc3339(&rendered).unwrap();
        assert_eq!(parsed.timestamp_millis(), now.timestamp_millis());
        assert_eq!(rendered.len(), "2024-01-15T10:30:00.000+08:00".len());
    }

    #[test]
    fn test_array_encoding() {
        let value = Value::array(&["a", "b"]).unwrap();
        assert_eq!(value.as_json(), Some(r#"["a","b"]"#));
        assert_eq!(value.kind(), "array");

        let err = Value::array(&42).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_map_encoding_preserves_insertion_order() {
        let mut map = IndexMap::new();
        map.insert("z", 1);
        map.insert("a", 2);
        let value = Value::map(&map).unwrap();
        assert_eq!(value, Value::Map(r#"{"z":1,"a":2}"#.to_string()));

        let err = Value::map(&vec![1, 2]).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn test_map_with_non_string_keys_fails() {
        let mut map = IndexMap::new();
        map.insert(vec![1], "x");
        assert!(matches!(Value::map(&map), Err(Error::Json(_))));
    }

    #[test]
    fn test_accessors() {
        assert_eq!(Value::from(5).as_i64(), Some(5));
        assert_eq!(Value::from(5i64).as_i64(), Some(5));
        assert_eq!(Value::from(5.0).as_i64(), None);
        assert_eq!(Value::from(true).as_bool(), Some(true));
        assert!(Value::from("x").is_text());
        assert!(!Value::from(1).is_text());
    }
}
