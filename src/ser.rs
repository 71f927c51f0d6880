//! Serializing Rust values into points.
//!
//! This module provides the [`Serializer`] that turns a struct or map into a
//! [`Point`], one field per struct field or map entry, in serialization order.
//!
//! ## Field mapping
//!
//! | Rust value                         | Field value                  |
//! |------------------------------------|------------------------------|
//! | `i8`, `i16`, `i32`, `u8`, `u16`    | `Value::Int`                 |
//! | `i64`, `u32`, `u64` up to `i64::MAX` | `Value::Long`              |
//! | larger `u64`                       | `Value::Text` (decimal)      |
//! | `f32` / `f64`                      | `Value::Float` / `Value::Double` |
//! | `bool`                             | `Value::Bool`                |
//! | `char`, `&str`, `String`, unit enum variants | `Value::Text`      |
//! | sequences, tuples, bytes           | `Value::Array` (JSON)        |
//! | nested maps, structs, data-carrying enum variants | `Value::Map` (JSON) |
//! | `None`, `()`                       | field omitted                |
//! | `DateTime` with `#[serde(with = "pandora_points::ser::date")]` | date text, as `Value::Date` renders it |
//!
//! Field keys (struct field names or map keys) must pass
//! [`validate_key`](crate::validate_key), otherwise serialization fails with
//! [`Error::InvalidArgument`].
//!
//! `chrono` serializes dates in its own RFC 3339 form, without milliseconds and with
//! `Z` for UTC. Mark date fields with [`date`] to get the record date format instead:
//!
//! ```rust
//! use chrono::{DateTime, FixedOffset};
//! use pandora_points::{from_point, to_point};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct Login {
//!     #[serde(with = "pandora_points::ser::date")]
//!     at: DateTime<FixedOffset>,
//! }
//!
//! let at = DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z").unwrap();
//! let point = to_point(&Login { at }).unwrap();
//! let text = point.get("at").and_then(|v| v.as_str()).unwrap();
//! assert!(text.contains(".000"));
//! assert!(!text.ends_with('Z'));
//!
//! let back: Login = from_point(&point).unwrap();
//! assert_eq!(back.at, at);
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use pandora_points::to_point;
//! use serde::Serialize;
//!
//! #[derive(Serialize)]
//! struct Access {
//!     host: String,
//!     status: u16,
//!     tags: Vec<String>,
//!     referer: Option<String>,
//! }
//!
//! let access = Access {
//!     host: "web-01".to_string(),
//!     status: 404,
//!     tags: vec!["edge".to_string()],
//!     referer: None,
//! };
//!
//! let point = to_point(&access).unwrap();
//! assert_eq!(point.to_string(), "host=web-01\tstatus=404\ttags=[\"edge\"]\n");
//! ```

use crate::{validate_key, Error, Point, PointOptions, Result, Value};
use serde::ser::{self, Impossible, Serialize};

type JsonSerializer = serde_json::value::Serializer;

/// Serializer producing a [`Point`].
///
/// Only structs, maps, and wrappers around them (newtypes, `Some`) can become a
/// point. `None` and `()` produce an empty point.
pub struct Serializer {
    point: Point,
}

impl Serializer {
    pub fn new(options: PointOptions) -> Self {
        Serializer {
            point: Point::with_options(options),
        }
    }

    pub fn into_inner(self) -> Point {
        self.point
    }

    fn unsupported(kind: &str) -> Error {
        Error::unsupported_type(&format!(
            "{} cannot be serialized as a point, expected a struct or map",
            kind
        ))
    }
}

impl<'a> ser::Serializer for &'a mut Serializer {
    type Ok = ();
    type Error = Error;

    type SerializeSeq = Impossible<(), Error>;
    type SerializeTuple = Impossible<(), Error>;
    type SerializeTupleStruct = Impossible<(), Error>;
    type SerializeTupleVariant = Impossible<(), Error>;
    type SerializeMap = FieldsSerializer<'a>;
    type SerializeStruct = FieldsSerializer<'a>;
    type SerializeStructVariant = Impossible<(), Error>;

    fn serialize_bool(self, _v: bool) -> Result<()> {
        Err(Serializer::unsupported("bool"))
    }

    fn serialize_i8(self, _v: i8) -> Result<()> {
        Err(Serializer::unsupported("integer"))
    }

    fn serialize_i16(self, _v: i16) -> Result<()> {
        Err(Serializer::unsupported("integer"))
    }

    fn serialize_i32(self, _v: i32) -> Result<()> {
        Err(Serializer::unsupported("integer"))
    }

    fn serialize_i64(self, _v: i64) -> Result<()> {
        Err(Serializer::unsupported("integer"))
    }

    fn serialize_u8(self, _v: u8) -> Result<()> {
        Err(Serializer::unsupported("integer"))
    }

    fn serialize_u16(self, _v: u16) -> Result<()> {
        Err(Serializer::unsupported("integer"))
    }

    fn serialize_u32(self, _v: u32) -> Result<()> {
        Err(Serializer::unsupported("integer"))
    }

    fn serialize_u64(self, _v: u64) -> Result<()> {
        Err(Serializer::unsupported("integer"))
    }

    fn serialize_f32(self, _v: f32) -> Result<()> {
        Err(Serializer::unsupported("float"))
    }

    fn serialize_f64(self, _v: f64) -> Result<()> {
        Err(Serializer::unsupported("float"))
    }

    fn serialize_char(self, _v: char) -> Result<()> {
        Err(Serializer::unsupported("char"))
    }

    fn serialize_str(self, _v: &str) -> Result<()> {
        Err(Serializer::unsupported("string"))
    }

    fn serialize_bytes(self, _v: &[u8]) -> Result<()> {
        Err(Serializer::unsupported("byte array"))
    }

    fn serialize_none(self) -> Result<()> {
        Ok(())
    }

    fn serialize_some<T>(self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<()> {
        Ok(())
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
    ) -> Result<()> {
        Err(Serializer::unsupported("enum variant"))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _value: &T,
    ) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        Err(Serializer::unsupported("enum variant"))
    }

    fn serialize_seq(self, _len: Option<usize>) -> Result<Self::SerializeSeq> {
        Err(Serializer::unsupported("sequence"))
    }

    fn serialize_tuple(self, _len: usize) -> Result<Self::SerializeTuple> {
        Err(Serializer::unsupported("tuple"))
    }

    fn serialize_tuple_struct(
        self,
        _name: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Err(Serializer::unsupported("tuple struct"))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Err(Serializer::unsupported("enum variant"))
    }

    fn serialize_map(self, _len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(FieldsSerializer {
            ser: self,
            key: None,
        })
    }

    fn serialize_struct(self, _name: &'static str, _len: usize) -> Result<Self::SerializeStruct> {
        Ok(FieldsSerializer {
            ser: self,
            key: None,
        })
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        _variant: &'static str,
        _len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Err(Serializer::unsupported("enum variant"))
    }
}

/// Appends struct fields or map entries to the point being built.
pub struct FieldsSerializer<'a> {
    ser: &'a mut Serializer,
    key: Option<String>,
}

impl<'a> FieldsSerializer<'a> {
    fn append<T>(&mut self, key: String, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        validate_key(&key)?;
        if let Some(value) = value.serialize(FieldSerializer)? {
            self.ser.point.append(key, value);
        }
        Ok(())
    }
}

impl<'a> ser::SerializeMap for FieldsSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = match serde_json::to_value(key)? {
            serde_json::Value::String(s) => s,
            serde_json::Value::Number(n) => n.to_string(),
            other => {
                return Err(Error::unsupported_type(&format!(
                    "field key must be a string or number, got {}",
                    other
                )))
            }
        };
        self.key = Some(key);
        Ok(())
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        let key = self
            .key
            .take()
            .ok_or_else(|| Error::custom("serialize_value called before serialize_key"))?;
        self.append(key, value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

impl<'a> ser::SerializeStruct for FieldsSerializer<'a> {
    type Ok = ();
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.append(key.to_string(), value)
    }

    fn end(self) -> Result<()> {
        Ok(())
    }
}

/// Serializer for a single field value. `None` means the field is omitted.
pub struct FieldSerializer;

impl ser::Serializer for FieldSerializer {
    type Ok = Option<Value>;
    type Error = Error;

    type SerializeSeq = Json<<JsonSerializer as ser::Serializer>::SerializeSeq>;
    type SerializeTuple = Json<<JsonSerializer as ser::Serializer>::SerializeTuple>;
    type SerializeTupleStruct = Json<<JsonSerializer as ser::Serializer>::SerializeTupleStruct>;
    type SerializeTupleVariant = Json<<JsonSerializer as ser::Serializer>::SerializeTupleVariant>;
    type SerializeMap = Json<<JsonSerializer as ser::Serializer>::SerializeMap>;
    type SerializeStruct = Json<<JsonSerializer as ser::Serializer>::SerializeStruct>;
    type SerializeStructVariant =
        Json<<JsonSerializer as ser::Serializer>::SerializeStructVariant>;

    fn serialize_bool(self, v: bool) -> Result<Option<Value>> {
        Ok(Some(Value::Bool(v)))
    }

    fn serialize_i8(self, v: i8) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_i16(self, v: i16) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_i32(self, v: i32) -> Result<Option<Value>> {
        Ok(Some(Value::Int(v)))
    }

    fn serialize_i64(self, v: i64) -> Result<Option<Value>> {
        Ok(Some(Value::Long(v)))
    }

    fn serialize_u8(self, v: u8) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_u16(self, v: u16) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_u32(self, v: u32) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_u64(self, v: u64) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_f32(self, v: f32) -> Result<Option<Value>> {
        Ok(Some(Value::Float(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Option<Value>> {
        Ok(Some(Value::Double(v)))
    }

    fn serialize_char(self, v: char) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_str(self, v: &str) -> Result<Option<Value>> {
        Ok(Some(Value::from(v)))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Option<Value>> {
        Value::array(v).map(Some)
    }

    fn serialize_none(self) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_some<T>(self, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Option<Value>> {
        Ok(None)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _variant_index: u32,
        variant: &'static str,
    ) -> Result<Option<Value>> {
        Ok(Some(Value::from(variant)))
    }

    fn serialize_newtype_struct<T>(self, _name: &'static str, value: &T) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T>(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Option<Value>>
    where
        T: ?Sized + Serialize,
    {
        let json = ser::Serializer::serialize_newtype_variant(
            serde_json::value::Serializer,
            name,
            variant_index,
            variant,
            value,
        )?;
        encode(json)
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<Self::SerializeSeq> {
        Ok(Json(ser::Serializer::serialize_seq(serde_json::value::Serializer, len)?))
    }

    fn serialize_tuple(self, len: usize) -> Result<Self::SerializeTuple> {
        Ok(Json(ser::Serializer::serialize_tuple(serde_json::value::Serializer, len)?))
    }

    fn serialize_tuple_struct(
        self,
        name: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleStruct> {
        Ok(Json(ser::Serializer::serialize_tuple_struct(
            serde_json::value::Serializer,
            name,
            len,
        )?))
    }

    fn serialize_tuple_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeTupleVariant> {
        Ok(Json(ser::Serializer::serialize_tuple_variant(
            serde_json::value::Serializer,
            name,
            variant_index,
            variant,
            len,
        )?))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<Self::SerializeMap> {
        Ok(Json(ser::Serializer::serialize_map(serde_json::value::Serializer, len)?))
    }

    fn serialize_struct(self, name: &'static str, len: usize) -> Result<Self::SerializeStruct> {
        Ok(Json(ser::Serializer::serialize_struct(
            serde_json::value::Serializer,
            name,
            len,
        )?))
    }

    fn serialize_struct_variant(
        self,
        name: &'static str,
        variant_index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<Self::SerializeStructVariant> {
        Ok(Json(ser::Serializer::serialize_struct_variant(
            serde_json::value::Serializer,
            name,
            variant_index,
            variant,
            len,
        )?))
    }
}

// Nested collections are built as JSON and stored as their compact text.
fn encode(json: serde_json::Value) -> Result<Option<Value>> {
    match json {
        serde_json::Value::Array(_) => Ok(Some(Value::Array(json.to_string()))),
        serde_json::Value::Object(_) => Ok(Some(Value::Map(json.to_string()))),
        other => Err(Error::custom(format!(
            "expected a JSON array or object, got {}",
            other
        ))),
    }
}

/// Serde adapter writing dates the way [`Value::Date`] renders them: local time,
/// milliseconds and a numeric offset.
///
/// Use it with `#[serde(with = "pandora_points::ser::date")]` on a
/// `DateTime<FixedOffset>` field. Reading back accepts any RFC 3339 date.
pub mod date {
    use crate::Value;
    use chrono::{DateTime, FixedOffset, TimeZone};
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S, Tz>(value: &DateTime<Tz>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        Tz: TimeZone,
    {
        serializer.serialize_str(&Value::from(value.clone()).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let text = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(text.trim()).map_err(de::Error::custom)
    }
}

/// Compound serializer that builds a nested value as JSON.
pub struct Json<S>(S);

impl<S> ser::SerializeSeq for Json<S>
where
    S: ser::SerializeSeq<Ok = serde_json::Value, Error = serde_json::Error>,
{
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.0.serialize_element(value).map_err(Error::from)
    }

    fn end(self) -> Result<Option<Value>> {
        encode(self.0.end()?)
    }
}

impl<S> ser::SerializeTuple for Json<S>
where
    S: ser::SerializeTuple<Ok = serde_json::Value, Error = serde_json::Error>,
{
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_element<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.0.serialize_element(value).map_err(Error::from)
    }

    fn end(self) -> Result<Option<Value>> {
        encode(self.0.end()?)
    }
}

impl<S> ser::SerializeTupleStruct for Json<S>
where
    S: ser::SerializeTupleStruct<Ok = serde_json::Value, Error = serde_json::Error>,
{
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.0.serialize_field(value).map_err(Error::from)
    }

    fn end(self) -> Result<Option<Value>> {
        encode(self.0.end()?)
    }
}

impl<S> ser::SerializeTupleVariant for Json<S>
where
    S: ser::SerializeTupleVariant<Ok = serde_json::Value, Error = serde_json::Error>,
{
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.0.serialize_field(value).map_err(Error::from)
    }

    fn end(self) -> Result<Option<Value>> {
        encode(self.0.end()?)
    }
}

impl<S> ser::SerializeMap for Json<S>
where
    S: ser::SerializeMap<Ok = serde_json::Value, Error = serde_json::Error>,
{
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_key<T>(&mut self, key: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.0.serialize_key(key).map_err(Error::from)
    }

    fn serialize_value<T>(&mut self, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.0.serialize_value(value).map_err(Error::from)
    }

    fn end(self) -> Result<Option<Value>> {
        encode(self.0.end()?)
    }
}

impl<S> ser::SerializeStruct for Json<S>
where
    S: ser::SerializeStruct<Ok = serde_json::Value, Error = serde_json::Error>,
{
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.0.serialize_field(key, value).map_err(Error::from)
    }

    fn end(self) -> Result<Option<Value>> {
        encode(self.0.end()?)
    }
}

impl<S> ser::SerializeStructVariant for Json<S>
where
    S: ser::SerializeStructVariant<Ok = serde_json::Value, Error = serde_json::Error>,
{
    type Ok = Option<Value>;
    type Error = Error;

    fn serialize_field<T>(&mut self, key: &'static str, value: &T) -> Result<()>
    where
        T: ?Sized + Serialize,
    {
        self.0.serialize_field(key, value).map_err(Error::from)
    }

    fn end(self) -> Result<Option<Value>> {
        encode(self.0.end()?)
    }
}
