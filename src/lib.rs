//! # pandora_points
//!
//! Point codec for the Pandora log database ingestion format.
//!
//! ## What is a Point?
//!
//! A point is one log record: an ordered list of `key=value` fields. On the wire a
//! point is a single line, fields separated by tabs and terminated by a newline:
//!
//! ```text
//! host=web-01\tstatus=200\tlatency=0.25\n
//! ```
//!
//! ## Key Features
//!
//! - **Typed appends**: integers, floats, booleans, text, dates, and JSON-encoded
//!   arrays and maps, each with a fixed textual rendering
//! - **Size accounting**: every point tracks its encoded byte size as fields are appended
//! - **Lenient parsing**: malformed segments and blank lines are skipped, never an error
//! - **Batching**: size-bounded batches of records ready for ingestion
//! - **Serde bridge**: build points from `#[derive(Serialize)]` types and read them back
//!   with `#[derive(Deserialize)]`
//!
//! ## Quick Start
//!
//! ```rust
//! use pandora_points::{parse_record, Point};
//!
//! let mut point = Point::new();
//! point.append("host", "web-01");
//! point.append("status", 200);
//! point.append("latency", 0.25);
//!
//! let record = point.to_string();
//! assert_eq!(record, "host=web-01\tstatus=200\tlatency=0.25\n");
//!
//! // Parsing gives back the same keys, with every value as text
//! let parsed = parse_record(&record);
//! assert_eq!(parsed.len(), 3);
//! assert_eq!(parsed.get("status").and_then(|v| v.as_str()), Some("200"));
//! ```
//!
//! ### Size Limits
//!
//! ```rust
//! use pandora_points::{Point, PointOptions};
//!
//! let mut point = Point::with_options(PointOptions::new().with_max_point_size(64));
//! while !point.is_too_large() {
//!     point.append("chunk", "0123456789");
//! }
//! assert!(point.byte_size() >= 64);
//! ```
//!
//! ### From Rust Types
//!
//! ```rust
//! use pandora_points::{from_point, to_point};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize, PartialEq, Debug)]
//! struct Access {
//!     host: String,
//!     status: u16,
//! }
//!
//! let access = Access { host: "web-01".to_string(), status: 404 };
//! let point = to_point(&access).unwrap();
//! assert_eq!(point.to_string(), "host=web-01\tstatus=404\n");
//!
//! let back: Access = from_point(&point).unwrap();
//! assert_eq!(back, access);
//! ```
//!
//! ## Logging
//!
//! The parser reports every dropped segment and skipped line at `TRACE` level, and
//! batches report rejected points at `DEBUG` level, through `tracing`. No
//! subscriber is installed by this crate.
//!
//! ## Format Description
//!
//! See the [`format`] module for the complete record format.

pub mod batch;
pub mod de;
pub mod error;
pub mod format;
pub mod macros;
pub mod options;
pub mod point;
pub mod ser;
pub mod value;

pub use batch::Batch;
pub use de::Deserializer;
pub use error::{Error, Result};
pub use options::{PointOptions, DEFAULT_MAX_BATCH_SIZE, DEFAULT_MAX_POINT_SIZE};
pub use point::{
    parse_record_with_options, parse_records_with_options, validate_key, Field, Point,
};
pub use ser::Serializer;
pub use value::Value;

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io;

/// Parses one record into a [`Point`] with default options.
///
/// The text is split on tabs; each trimmed segment of the form `key=value` becomes
/// a text field. Segments without `=` or with an empty key are dropped. Blank
/// input gives an empty point.
///
/// # Examples
///
/// ```rust
/// use pandora_points::parse_record;
///
/// let point = parse_record("=1\tb=2\tnoise");
/// assert_eq!(point.len(), 1);
/// assert_eq!(point.to_string(), "b=2\n");
///
/// assert!(parse_record("   ").is_empty());
/// ```
#[must_use]
pub fn parse_record(text: &str) -> Point {
    parse_record_with_options(text, PointOptions::default())
}

/// Parses newline-separated records, skipping blank lines.
///
/// # Examples
///
/// ```rust
/// use pandora_points::parse_records;
///
/// let points = parse_records("a=1\n\nb=2");
/// assert_eq!(points.len(), 2);
/// assert_eq!(points[1].to_string(), "b=2\n");
/// ```
#[must_use]
pub fn parse_records(text: &str) -> Vec<Point> {
    parse_records_with_options(text, PointOptions::default())
}

/// Encodes points as multi-record text, one record per line.
///
/// # Examples
///
/// ```rust
/// use pandora_points::{parse_records, to_string};
///
/// let points = parse_records("a=1\nb=2");
/// assert_eq!(to_string(&points), "a=1\nb=2\n");
/// ```
#[must_use]
pub fn to_string(points: &[Point]) -> String {
    let capacity = points.iter().map(Point::byte_size).sum();
    let mut output = String::with_capacity(capacity);
    for point in points {
        output.push_str(&point.to_string());
    }
    output
}

/// Writes points as multi-record text to `writer`.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn to_writer<W>(mut writer: W, points: &[Point]) -> Result<()>
where
    W: io::Write,
{
    for point in points {
        point.write_to(&mut writer)?;
    }
    Ok(())
}

/// Reads multi-record text from `reader` and parses it.
///
/// # Examples
///
/// ```rust
/// use pandora_points::from_reader;
/// use std::io::Cursor;
///
/// let points = from_reader(Cursor::new(b"a=1\nb=2\n")).unwrap();
/// assert_eq!(points.len(), 2);
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails or the input is not valid UTF-8.
pub fn from_reader<R>(mut reader: R) -> Result<Vec<Point>>
where
    R: io::Read,
{
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .map_err(|e| Error::io(&e.to_string()))?;
    Ok(parse_records(&text))
}

/// Serializes a struct or map into a [`Point`] with default options.
///
/// # Errors
///
/// Returns [`Error::UnsupportedType`] if `value` is not a struct or map, or if a map
/// key is not a string or number.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_point<T>(value: &T) -> Result<Point>
where
    T: ?Sized + Serialize,
{
    to_point_with_options(value, PointOptions::default())
}

/// Serializes a struct or map into a [`Point`] carrying `options`.
///
/// # Errors
///
/// See [`to_point`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_point_with_options<T>(value: &T, options: PointOptions) -> Result<Point>
where
    T: ?Sized + Serialize,
{
    let mut serializer = Serializer::new(options);
    value.serialize(&mut serializer)?;
    Ok(serializer.into_inner())
}

/// Deserializes an instance of `T` from the fields of a [`Point`].
///
/// # Errors
///
/// Returns [`Error::TypeMismatch`] if a field's text cannot be read as the requested
/// type, or a custom error for missing or unknown fields.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_point<T>(point: &Point) -> Result<T>
where
    T: DeserializeOwned,
{
    T::deserialize(Deserializer::new(point))
}
