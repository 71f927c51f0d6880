//! Error types for the point codec.
//!
//! Parsing record text never fails: malformed segments are dropped. Errors come
//! from the typed surfaces around the codec:
//!
//! - **Invalid arguments**: an absent value handed to [`Point::try_append`](crate::Point::try_append),
//!   or array/map helpers given input that does not encode to the expected JSON shape
//! - **Size limits**: a [`Batch`](crate::Batch) refusing a point
//! - **Serde bridge**: unsupported shapes in [`to_point`](crate::to_point) and text that
//!   cannot be read back as the requested type in [`from_point`](crate::from_point)
//! - **I/O**: failures of the reader or writer handed to the streaming helpers
//!
//! ## Examples
//!
//! ```rust
//! use pandora_points::{Error, Point};
//!
//! let mut point = Point::new();
//! let err = point.try_append::<i64>("latency", None).unwrap_err();
//! assert!(matches!(err, Error::InvalidArgument(_)));
//! assert!(point.is_empty());
//! ```

use std::fmt;
use thiserror::Error;

/// Represents all possible errors raised around point encoding and decoding.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// A caller-supplied argument cannot be turned into a field
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A point is over the per-point threshold
    #[error("Point too large: {size} bytes, limit is {limit} bytes")]
    PointTooLarge { size: usize, limit: usize },

    /// A batch has no room left for another point
    #[error("Batch full: adding the point would reach {size} bytes, limit is {limit} bytes")]
    BatchFull { size: usize, limit: usize },

    /// Field text that cannot be read as the requested type
    #[error("Type mismatch in field '{key}': expected {expected}, found {found:?}")]
    TypeMismatch {
        key: String,
        expected: String,
        found: String,
    },

    /// Unsupported shape for a point or field
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// JSON encoding or decoding of an array/map field failed
    #[error("JSON error: {0}")]
    Json(String),

    /// Custom error
    #[error("Error: {0}")]
    Custom(String),
}

impl Error {
    /// Creates an invalid argument error.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pandora_points::Error;
    ///
    /// let err = Error::invalid_argument("value for 'host' is absent");
    /// assert!(err.to_string().contains("'host'"));
    /// ```
    pub fn invalid_argument<T: fmt::Display>(msg: T) -> Self {
        Error::InvalidArgument(msg.to_string())
    }

    /// Creates a type mismatch error for the field `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pandora_points::Error;
    ///
    /// let err = Error::type_mismatch("status", "integer", "ok");
    /// assert!(err.to_string().contains("expected integer"));
    /// ```
    pub fn type_mismatch(key: &str, expected: &str, found: &str) -> Self {
        Error::TypeMismatch {
            key: key.to_string(),
            expected: expected.to_string(),
            found: found.to_string(),
        }
    }

    /// Creates an unsupported type error.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json(err.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
