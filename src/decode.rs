//! Weakly typed decoding of a flat `String -> String` map.
//!
//! Parameter Store only holds strings, so every leaf goes through
//! [`LooseValue`], which parses the string into whatever type the target
//! field asks for. Empty strings decode to zero, `false`, `None` or the
//! first enum variant; comma separated values (the `StringList` format)
//! decode into sequences. Struct fields with no key in the map decode as if
//! the key held an empty string.

use serde::de::value::{
    Error as ValueError, MapDeserializer, SeqDeserializer, StringDeserializer,
};
use serde::de::{self, DeserializeOwned, IntoDeserializer, Unexpected, Visitor};
use std::collections::HashMap;

pub fn from_key_value_map<T: DeserializeOwned>(
    map: HashMap<String, String>,
) -> Result<T, ValueError> {
    T::deserialize(FlatMap(map))
}

/// Top level of the decode: the whole map.
struct FlatMap(HashMap<String, String>);

impl<'de> de::Deserializer<'de> for FlatMap {
    type Error = ValueError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let entries: MapDeserializer<'_, _, ValueError> =
            MapDeserializer::new(self.0.into_iter().map(|(key, value)| (key, LooseValue(value))));
        de::Deserializer::deserialize_any(entries, visitor)
    }

    fn deserialize_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        fields: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        let mut map = self.0;
        for field in fields {
            map.entry(field.to_string()).or_default();
        }
        de::Deserializer::deserialize_any(FlatMap(map), visitor)
    }

    serde::forward_to_deserialize_any! {
        bool i8 i16 i32 i64 i128 u8 u16 u32 u64 u128 f32 f64 char str string
        bytes byte_buf option unit unit_struct newtype_struct seq tuple
        tuple_struct map enum identifier ignored_any
    }
}

struct LooseValue(String);

impl LooseValue {
    fn numeric(&self) -> &str {
        let trimmed = self.0.trim();
        if trimmed.is_empty() {
            "0"
        } else {
            trimmed
        }
    }
}

macro_rules! deserialize_parsed {
    ($($method:ident => $visit:ident,)*) => {
        $(
            fn $method<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
                match self.numeric().parse() {
                    Ok(value) => visitor.$visit(value),
                    Err(_) => Err(de::Error::invalid_value(Unexpected::Str(&self.0), &visitor)),
                }
            }
        )*
    };
}

impl<'de> IntoDeserializer<'de, ValueError> for LooseValue {
    type Deserializer = Self;

    fn into_deserializer(self) -> Self {
        self
    }
}

impl<'de> de::Deserializer<'de> for LooseValue {
    type Error = ValueError;

    fn deserialize_any<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_string(self.0)
    }

    fn deserialize_bool<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        match self.0.trim().to_ascii_lowercase().as_str() {
            "1" | "t" | "true" => visitor.visit_bool(true),
            "" | "0" | "f" | "false" => visitor.visit_bool(false),
            _ => Err(de::Error::invalid_value(Unexpected::Str(&self.0), &visitor)),
        }
    }

    deserialize_parsed! {
        deserialize_i8 => visit_i8,
        deserialize_i16 => visit_i16,
        deserialize_i32 => visit_i32,
        deserialize_i64 => visit_i64,
        deserialize_i128 => visit_i128,
        deserialize_u8 => visit_u8,
        deserialize_u16 => visit_u16,
        deserialize_u32 => visit_u32,
        deserialize_u64 => visit_u64,
        deserialize_u128 => visit_u128,
        deserialize_f32 => visit_f32,
        deserialize_f64 => visit_f64,
    }

    fn deserialize_char<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let mut chars = self.0.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => visitor.visit_char(c),
            _ => Err(de::Error::invalid_value(Unexpected::Str(&self.0), &visitor)),
        }
    }

    fn deserialize_option<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        if self.0.is_empty() {
            visitor.visit_none()
        } else {
            visitor.visit_some(self)
        }
    }

    fn deserialize_unit<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        visitor.visit_unit()
    }

    fn deserialize_newtype_struct<V: Visitor<'de>>(
        self,
        _name: &'static str,
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        visitor.visit_newtype_struct(self)
    }

    fn deserialize_seq<V: Visitor<'de>>(self, visitor: V) -> Result<V::Value, Self::Error> {
        let items: Vec<LooseValue> = if self.0.trim().is_empty() {
            Vec::new()
        } else {
            self.0
                .split(',')
                .map(|item| LooseValue(item.trim().to_string()))
                .collect()
        };
        let mut seq: SeqDeserializer<_, ValueError> = SeqDeserializer::new(items.into_iter());
        let value = visitor.visit_seq(&mut seq)?;
        seq.end()?;
        Ok(value)
    }

    fn deserialize_enum<V: Visitor<'de>>(
        self,
        _name: &'static str,
        variants: &'static [&'static str],
        visitor: V,
    ) -> Result<V::Value, Self::Error> {
        let name = match variants.first() {
            Some(first) if self.0.trim().is_empty() => first.to_string(),
            _ => self.0,
        };
        let variant: StringDeserializer<ValueError> = name.into_deserializer();
        visitor.visit_enum(variant)
    }

    serde::forward_to_deserialize_any! {
        str string bytes byte_buf unit_struct tuple tuple_struct map struct
        identifier ignored_any
    }
}
