//! Reading Rust values back out of points.
//!
//! This module provides the [`Deserializer`] behind [`from_point`](crate::from_point).
//! It reads each field's rendered text, so it works the same for typed points
//! and for points parsed from record text, where every value is text.
//!
//! - Scalars are parsed from the text (`"200"` into a `u16`, `"true"` into a `bool`)
//! - Sequences, maps and nested structs are decoded from the field's JSON text
//! - Unit enum variants are matched by name
//! - An empty value reads as `None` for optional fields
//! - When a key repeats, the last occurrence wins
//!
//! ## Usage
//!
//! ```rust
//! use pandora_points::{from_point, parse_record};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize, Debug, PartialEq)]
//! struct Access {
//!     host: String,
//!     status: u16,
//!     tags: Vec<String>,
//! }
//!
//! let point = parse_record("host=web-01\tstatus=404\ttags=[\"edge\"]");
//! let access: Access = from_point(&point).unwrap();
//! assert_eq!(access.status, 404);
//! assert_eq!(access.tags, vec!["edge"]);
//! ```

use crate::{Error, Point, Result};
use indexmap::IndexMap;
use serde::de::{self, IntoDeserializer};
use serde::forward_to_deserialize_any;
use std::str::FromStr;

/// Deserializer reading a [`Point`] as a map of field keys to field text.
pub struct Deserializer<'a> {
    point: &'a Point,
}

impl<'a> Deserializer<'a> {
    pub fn new(point: &'a Point) -> Self {
        Deserializer { point }
    }
}

impl<'de, 'a> de::Deserializer<'de> for Deserializer<'a> {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let mut fields = IndexMap::with_capacity(self.point.len());
        for field in self.point {
            fields.insert(field.key().to_string(), field.value().to_string());
        }
        visitor.visit_map(FieldsAccess::new(fields))
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_some(self)
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf unit unit_struct seq tuple
        tuple_struct map struct enum identifier ignored_any
    }
}

struct FieldsAccess {
    iter: indexmap::map::IntoIter<String, String>,
    value: Option<(String, String)>,
}

impl FieldsAccess {
    fn new(fields: IndexMap<String, String>) -> Self {
        FieldsAccess {
            iter: fields.into_iter(),
            value: None,
        }
    }
}

impl<'de> de::MapAccess<'de> for FieldsAccess {
    type Error = Error;

    fn next_key_seed<K>(&mut self, seed: K) -> Result<Option<K::Value>>
    where
        K: de::DeserializeSeed<'de>,
    {
        match self.iter.next() {
            Some((key, text)) => {
                self.value = Some((key.clone(), text));
                seed.deserialize(key.into_deserializer()).map(Some)
            }
            None => Ok(None),
        }
    }

    fn next_value_seed<V>(&mut self, seed: V) -> Result<V::Value>
    where
        V: de::DeserializeSeed<'de>,
    {
        match self.value.take() {
            Some((key, text)) => seed.deserialize(TextDeserializer { key, text }),
            None => Err(Error::custom("next_value_seed called before next_key_seed")),
        }
    }

    fn size_hint(&self) -> Option<usize> {
        Some(self.iter.len())
    }
}

/// Deserializes one field's text into whatever type is asked for.
struct TextDeserializer {
    key: String,
    text: String,
}

impl TextDeserializer {
    fn parse<T: FromStr>(&self, expected: &str) -> Result<T> {
        self.text
            .trim()
            .parse()
            .map_err(|_| Error::type_mismatch(&self.key, expected, &self.text))
    }

    fn json(&self) -> Result<serde_json::Value> {
        serde_json::from_str(&self.text)
            .map_err(|_| Error::type_mismatch(&self.key, "JSON", &self.text))
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident($ty:ty, $expected:literal),)*) => {
        $(
            fn $method<V>(self, visitor: V) -> Result<V::Value>
            where
                V: de::Visitor<'de>,
            {
                let v: $ty = self.parse($expected)?;
                visitor.$visit(v)
            }
        )*
    };
}

impl<'de> de::Deserializer<'de> for TextDeserializer {
    type Error = Error;

    fn deserialize_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.text)
    }

    deserialize_parsed! {
        deserialize_i8 => visit_i8(i8, "integer"),
        deserialize_i16 => visit_i16(i16, "integer"),
        deserialize_i32 => visit_i32(i32, "integer"),
        deserialize_i64 => visit_i64(i64, "integer"),
        deserialize_u8 => visit_u8(u8, "unsigned integer"),
        deserialize_u16 => visit_u16(u16, "unsigned integer"),
        deserialize_u32 => visit_u32(u32, "unsigned integer"),
        deserialize_u64 => visit_u64(u64, "unsigned integer"),
        deserialize_f32 => visit_f32(f32, "float"),
        deserialize_f64 => visit_f64(f64, "float"),
    }

    fn deserialize_bool<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        match self.text.trim() {
            "true" => visitor.visit_bool(true),
            "false" => visitor.visit_bool(false),
            _ => Err(Error::type_mismatch(&self.key, "boolean", &self.text)),
        }
    }

    fn deserialize_char<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        let mut chars = self.text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(Error::type_mismatch(&self.key, "single character", &self.text)),
        }
    }

    fn deserialize_str<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.text)
    }

    fn deserialize_string<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.text)
    }

    fn deserialize_bytes<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_byte_buf(self.text.into_bytes())
    }

    fn deserialize_byte_buf<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_byte_buf(self.text.into_bytes())
    }

    fn deserialize_option<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.text.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_unit_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V>(self, _name: &'static str, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_seq(self.json()?, visitor).map_err(Error::from)
    }

    fn deserialize_tuple<V>(self, len: usize, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_tuple(self.json()?, len, visitor).map_err(Error::from)
    }

    fn deserialize_tuple_struct<V>(
        self,
        name: &'static str,
        len: usize,
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_tuple_struct(self.json()?, name, len, visitor)
            .map_err(Error::from)
    }

    fn deserialize_map<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_map(self.json()?, visitor).map_err(Error::from)
    }

    fn deserialize_struct<V>(
        self,
        name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        de::Deserializer::deserialize_struct(self.json()?, name, fields, visitor)
            .map_err(Error::from)
    }

    fn deserialize_enum<V>(
        self,
        name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        if self.text.starts_with('{') {
            de::Deserializer::deserialize_enum(self.json()?, name, variants, visitor)
                .map_err(Error::from)
        } else {
            visitor.visit_enum(self.text.into_deserializer())
        }
    }

    fn deserialize_identifier<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_string(self.text)
    }

    fn deserialize_ignored_any<V>(self, visitor: V) -> Result<V::Value>
    where
        V: de::Visitor<'de>,
    {
        visitor.visit_unit()
    }
}
