//! Points and the record text format.
//!
//! A [`Point`] is an ordered list of [`Field`]s. It serializes to one record:
//!
//! ```text
//! key1=value1\tkey2=value2\t...\tkeyN=valueN\n
//! ```
//!
//! The point keeps a running byte size, updated once per append, so size checks
//! never walk the field list.
//!
//! ## Examples
//!
//! ```rust
//! use pandora_points::Point;
//!
//! let mut point = Point::new();
//! point.append("host", "web-01");
//! point.append("status", 200);
//! point.append("cached", false);
//!
//! assert_eq!(point.to_string(), "host=web-01\tstatus=200\tcached=false\n");
//! assert_eq!(point.byte_size(), 12 + 11 + 13);
//! ```

use crate::{Error, PointOptions, Result, Value};
use serde::Serialize;
use std::fmt;
use std::io;
use tracing::trace;

/// A single `key=value` pair inside a record.
///
/// The byte length of the serialized pair is computed once, when the field is built.
#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    key: String,
    value: Value,
    size: usize,
}

impl Field {
    /// Creates a field, caching the UTF-8 length of `key=value`.
    ///
    /// The value is stored as given; text escaping is applied by
    /// [`Point::append`], not here.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pandora_points::{Field, Value};
    ///
    /// let field = Field::new("city", Value::from("Zürich"));
    /// assert_eq!(field.to_string(), "city=Zürich");
    /// assert_eq!(field.byte_size(), 12);
    /// ```
    pub fn new(key: impl Into<String>, value: Value) -> Self {
        let key = key.into();
        let size = key.len() + 1 + value.to_string().len();
        Field { key, value, size }
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// Byte length of the serialized `key=value` form, without delimiter.
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.size
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}

/// One record: an ordered list of fields plus its running byte size.
///
/// Fields are only ever appended. Field order is serialization order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Point {
    fields: Vec<Field>,
    size: usize,
    options: PointOptions,
}

impl Point {
    /// Creates an empty point with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty point that checks its size against `options`.
    #[must_use]
    pub fn with_options(options: PointOptions) -> Self {
        Point {
            fields: Vec::new(),
            size: 0,
            options,
        }
    }

    /// Parses one record. See [`parse_record`](crate::parse_record).
    #[must_use]
    pub fn parse(text: &str) -> Self {
        parse_record_with_options(text, PointOptions::default())
    }

    /// Appends a typed field.
    ///
    /// Newlines and tabs in text values are replaced by the two-character
    /// sequences `\n` and `\t`, since they delimit records and fields.
    ///
    /// The key is written as given and must satisfy [`validate_key`]: a blank key,
    /// or one containing `=`, a tab or a newline, yields a record that does not
    /// parse back into the same fields. Use [`try_append`](Self::try_append) when
    /// keys come from untrusted input.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pandora_points::Point;
    ///
    /// let mut point = Point::new();
    /// point.append("msg", "line one\nline two");
    /// assert_eq!(point.to_string(), "msg=line one\\nline two\n");
    /// ```
    pub fn append<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let value = match value.into() {
            Value::Text(s) => Value::Text(escape(&s)),
            other => other,
        };
        self.push_field(Field::new(key, value));
    }

    /// Appends a field whose value may be absent, checking the key first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when the key fails [`validate_key`] or
    /// `value` is `None`; the point is left unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pandora_points::Point;
    ///
    /// let mut point = Point::new();
    /// point.try_append("user", Some("alice")).unwrap();
    /// assert!(point.try_append::<&str>("referer", None).is_err());
    /// assert!(point.try_append("bad\tkey", Some(1)).is_err());
    /// assert_eq!(point.len(), 1);
    /// ```
    pub fn try_append<V>(&mut self, key: impl Into<String>, value: Option<V>) -> Result<()>
    where
        V: Into<Value>,
    {
        let key = key.into();
        validate_key(&key)?;
        match value {
            Some(value) => {
                self.append(key, value);
                Ok(())
            }
            None => Err(Error::invalid_argument(format!(
                "value for field '{}' is absent",
                key
            ))),
        }
    }

    /// Appends a sequence, stored as its compact JSON encoding.
    ///
    /// # Errors
    ///
    /// See [`Value::array`].
    pub fn append_array<T>(&mut self, key: impl Into<String>, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let value = Value::array(value)?;
        self.push_field(Field::new(key, value));
        Ok(())
    }

    /// Appends a mapping, stored as its compact JSON encoding.
    ///
    /// # Errors
    ///
    /// See [`Value::map`].
    pub fn append_map<T>(&mut self, key: impl Into<String>, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let value = Value::map(value)?;
        self.push_field(Field::new(key, value));
        Ok(())
    }

    // The only place `size` changes. The `+ 1` is the tab or newline that follows
    // the field once serialized.
    fn push_field(&mut self, field: Field) {
        self.size += field.byte_size() + 1;
        self.fields.push(field);
    }

    /// Total serialized size in bytes, delimiters included.
    #[inline]
    #[must_use]
    pub fn byte_size(&self) -> usize {
        self.size
    }

    /// Returns `true` once [`byte_size`](Self::byte_size) reaches the configured
    /// `max_point_size`.
    ///
    /// Appends are never refused; callers decide what to do with a large point.
    #[inline]
    #[must_use]
    pub fn is_too_large(&self) -> bool {
        self.size >= self.options.max_point_size
    }

    #[must_use]
    pub fn options(&self) -> &PointOptions {
        &self.options
    }

    #[must_use]
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    /// Returns the value of the first field named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.iter().find(|f| f.key == key).map(|f| &f.value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Writes the serialized record to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if writing fails.
    pub fn write_to<W: io::Write>(&self, mut writer: W) -> Result<()> {
        write!(writer, "{}", self).map_err(|e| Error::io(&e.to_string()))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let last = self.fields.len().saturating_sub(1);
        for (i, field) in self.fields.iter().enumerate() {
            write!(f, "{}", field)?;
            f.write_str(if i == last { "\n" } else { "\t" })?;
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Point {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Checks that `key` can be written as a field key.
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] when the key is empty or only whitespace, or
/// contains `=`, a tab or a newline.
///
/// # Examples
///
/// ```rust
/// use pandora_points::validate_key;
///
/// assert!(validate_key("host").is_ok());
/// assert!(validate_key("  ").is_err());
/// assert!(validate_key("a=b").is_err());
/// ```
pub fn validate_key(key: &str) -> Result<()> {
    if key.trim().is_empty() {
        return Err(Error::invalid_argument("field key is blank"));
    }
    if key.contains(['=', '\t', '\n']) {
        return Err(Error::invalid_argument(format!(
            "field key '{}' contains '=', a tab or a newline",
            key.escape_debug()
        )));
    }
    Ok(())
}

fn escape(s: &str) -> String {
    if s.contains(['\n', '\t']) {
        s.replace('\n', "\\n").replace('\t', "\\t")
    } else {
        s.to_string()
    }
}

/// Parses one record, see [`parse_record`](crate::parse_record).
#[must_use]
pub fn parse_record_with_options(text: &str, options: PointOptions) -> Point {
    let mut point = Point::with_options(options);
    for segment in text.trim().split('\t') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        match segment.find('=') {
            Some(i) if i > 0 => {
                // Parsed text is kept verbatim; escaping only applies to typed appends.
                let field = Field::new(&segment[..i], Value::Text(segment[i + 1..].to_string()));
                point.push_field(field);
            }
            Some(_) => trace!(segment, "dropping segment with empty key"),
            None => trace!(segment, "dropping segment without '='"),
        }
    }
    point
}

/// Parses newline-separated records, see [`parse_records`](crate::parse_records).
#[must_use]
pub fn parse_records_with_options(text: &str, options: PointOptions) -> Vec<Point> {
    let mut points = Vec::new();
    for (line_no, line) in text.split('\n').enumerate() {
        if line.trim().is_empty() {
            trace!(line = line_no + 1, "skipping blank line");
            continue;
        }
        points.push(parse_record_with_options(line, options));
    }
    points
}
