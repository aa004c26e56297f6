//! Conversion of `Serialize` types into [`Value`] trees.
//!
//! Placeholders address struct fields by name because [`ValueSerializer`]
//! turns structs into objects, usually through [`to_value`](crate::to_value):
//!
//! ```rust
//! use serde::Serialize;
//! use textfmt::{to_value, Value};
//!
//! #[derive(Serialize)]
//! struct Point { x: i32, y: i32 }
//!
//! let value = to_value(&Point { x: 1, y: 2 }).unwrap();
//! assert_eq!(value.get("y"), Some(&Value::from(2)));
//! ```
//!
//! Enums follow serde's externally tagged layout: unit variants become their
//! name, every other variant an object with the name as its only key, so
//! that `${event.Moved}` reaches the payload.

use crate::{Error, Result, Value, ValueMap};
use serde::{ser, Serialize};

/// Serializer producing a [`Value`] instead of text.
pub struct ValueSerializer;

/// Collects the elements of sequences, tuples and tuple variants.
pub struct ArrayBuilder {
    items: Vec<Value>,
    variant: Option<&'static str>,
}

/// Collects the entries of maps, structs and struct variants.
pub struct ObjectBuilder {
    map: ValueMap,
    key: Option<String>,
    variant: Option<&'static str>,
}

fn convert<T: ?Sized + Serialize>(value: &T) -> Result<Value> {
    value.serialize(ValueSerializer)
}

/// Wraps `value` as `{ variant: value }` when it came from an enum variant.
fn tagged(variant: Option<&'static str>, value: Value) -> Value {
    let Some(variant) = variant else {
        return value;
    };
    let mut map = ValueMap::with_capacity(1);
    map.insert(variant.to_owned(), value);
    Value::Object(map)
}

impl ser::Serializer for ValueSerializer {
    type Ok = Value;
    type Error = Error;

    type SerializeSeq = ArrayBuilder;
    type SerializeTuple = ArrayBuilder;
    type SerializeTupleStruct = ArrayBuilder;
    type SerializeTupleVariant = ArrayBuilder;
    type SerializeMap = ObjectBuilder;
    type SerializeStruct = ObjectBuilder;
    type SerializeStructVariant = ObjectBuilder;

    fn serialize_bool(self, v: bool) -> Result<Value> {
        Ok(Value::Bool(v))
    }

    fn serialize_i8(self, v: i8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i16(self, v: i16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i32(self, v: i32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i64(self, v: i64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_i128(self, v: i128) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u8(self, v: u8) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u16(self, v: u16) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u32(self, v: u32) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u64(self, v: u64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_u128(self, v: u128) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_f32(self, v: f32) -> Result<Value> {
        Ok(Value::from(f64::from(v)))
    }

    fn serialize_f64(self, v: f64) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_char(self, v: char) -> Result<Value> {
        Ok(Value::String(v.to_string()))
    }

    fn serialize_str(self, v: &str) -> Result<Value> {
        Ok(Value::from(v))
    }

    fn serialize_bytes(self, v: &[u8]) -> Result<Value> {
        Ok(Value::Array(v.iter().copied().map(Value::from).collect()))
    }

    fn serialize_none(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_some<T: ?Sized + Serialize>(self, value: &T) -> Result<Value> {
        value.serialize(self)
    }

    fn serialize_unit(self) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_struct(self, _name: &'static str) -> Result<Value> {
        Ok(Value::Null)
    }

    fn serialize_unit_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
    ) -> Result<Value> {
        Ok(Value::from(variant))
    }

    fn serialize_newtype_struct<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        value: &T,
    ) -> Result<Value> {
        value.serialize(self)
    }

    fn serialize_newtype_variant<T: ?Sized + Serialize>(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        value: &T,
    ) -> Result<Value> {
        Ok(tagged(Some(variant), convert(value)?))
    }

    fn serialize_seq(self, len: Option<usize>) -> Result<ArrayBuilder> {
        Ok(ArrayBuilder::new(len.unwrap_or(0), None))
    }

    fn serialize_tuple(self, len: usize) -> Result<ArrayBuilder> {
        Ok(ArrayBuilder::new(len, None))
    }

    fn serialize_tuple_struct(self, _name: &'static str, len: usize) -> Result<ArrayBuilder> {
        Ok(ArrayBuilder::new(len, None))
    }

    fn serialize_tuple_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<ArrayBuilder> {
        Ok(ArrayBuilder::new(len, Some(variant)))
    }

    fn serialize_map(self, len: Option<usize>) -> Result<ObjectBuilder> {
        Ok(ObjectBuilder::new(len.unwrap_or(0), None))
    }

    fn serialize_struct(self, _name: &'static str, len: usize) -> Result<ObjectBuilder> {
        Ok(ObjectBuilder::new(len, None))
    }

    fn serialize_struct_variant(
        self,
        _name: &'static str,
        _index: u32,
        variant: &'static str,
        len: usize,
    ) -> Result<ObjectBuilder> {
        Ok(ObjectBuilder::new(len, Some(variant)))
    }
}

impl ArrayBuilder {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        ArrayBuilder {
            items: Vec::with_capacity(capacity),
            variant,
        }
    }

    fn push<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        self.items.push(convert(value)?);
        Ok(())
    }
}

impl ObjectBuilder {
    fn new(capacity: usize, variant: Option<&'static str>) -> Self {
        ObjectBuilder {
            map: ValueMap::with_capacity(capacity),
            key: None,
            variant,
        }
    }

    fn field<T: ?Sized + Serialize>(&mut self, key: &str, value: &T) -> Result<()> {
        self.map.insert(key.to_owned(), convert(value)?);
        Ok(())
    }
}

macro_rules! array_builder {
    ($($trait:ident :: $method:ident),*) => {$(
        impl ser::$trait for ArrayBuilder {
            type Ok = Value;
            type Error = Error;

            fn $method<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
                self.push(value)
            }

            fn end(self) -> Result<Value> {
                Ok(tagged(self.variant, Value::Array(self.items)))
            }
        }
    )*};
}

array_builder!(
    SerializeSeq::serialize_element,
    SerializeTuple::serialize_element,
    SerializeTupleStruct::serialize_field,
    SerializeTupleVariant::serialize_field
);

macro_rules! object_builder {
    ($($trait:ident),*) => {$(
        impl ser::$trait for ObjectBuilder {
            type Ok = Value;
            type Error = Error;

            fn serialize_field<T: ?Sized + Serialize>(
                &mut self,
                key: &'static str,
                value: &T,
            ) -> Result<()> {
                self.field(key, value)
            }

            fn end(self) -> Result<Value> {
                Ok(tagged(self.variant, Value::Object(self.map)))
            }
        }
    )*};
}

object_builder!(SerializeStruct, SerializeStructVariant);

impl ser::SerializeMap for ObjectBuilder {
    type Ok = Value;
    type Error = Error;

    /// Keys become text; placeholders can only name scalar keys.
    fn serialize_key<T: ?Sized + Serialize>(&mut self, key: &T) -> Result<()> {
        self.key = Some(match convert(key)? {
            Value::String(s) => s,
            key @ (Value::Number(_) | Value::Bool(_) | Value::BigInt(_)) => key.to_string(),
            _ => return Err(Error::unsupported_type("map keys must be strings or numbers")),
        });
        Ok(())
    }

    fn serialize_value<T: ?Sized + Serialize>(&mut self, value: &T) -> Result<()> {
        let key = self
            .key
            .take()
            .ok_or_else(|| Error::custom("map value serialized before its key"))?;
        self.field(&key, value)
    }

    fn end(self) -> Result<Value> {
        Ok(tagged(self.variant, Value::Object(self.map)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;
    use std::collections::BTreeMap;

    #[derive(Serialize)]
    struct User {
        name: String,
        age: u32,
        email: Option<String>,
    }

    #[derive(Serialize)]
    enum Event {
        Started,
        Moved(i32),
        Resized { w: u32, h: u32 },
        Swapped(u8, u8),
    }

    #[test]
    fn test_struct_becomes_object() {
        let user = User {
            name: "Bo".to_string(),
            age: 41,
            email: None,
        };
        let value = convert(&user).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["name", "age", "email"]);
        assert_eq!(value.get("email"), Some(&Value::Null));
    }

    #[test]
    fn test_enum_variants() {
        assert_eq!(convert(&Event::Started).unwrap(), Value::from("Started"));
        assert_eq!(
            convert(&Event::Moved(3)).unwrap().get_path("Moved"),
            Some(&Value::from(3))
        );
        assert_eq!(
            convert(&Event::Resized { w: 2, h: 5 })
                .unwrap()
                .get_path("Resized.h"),
            Some(&Value::from(5))
        );
        assert_eq!(
            convert(&Event::Swapped(1, 2)).unwrap().get_path("Swapped.1"),
            Some(&Value::from(2))
        );
    }

    #[test]
    fn test_large_integers_become_bigint() {
        assert_eq!(
            convert(&u64::MAX).unwrap(),
            Value::BigInt(BigInt::from(u64::MAX))
        );
        assert_eq!(convert(&7u128).unwrap(), Value::from(7));
    }

    #[test]
    fn test_numeric_map_keys() {
        let mut map = BTreeMap::new();
        map.insert(1, "one");
        map.insert(2, "two");
        let value = convert(&map).unwrap();
        assert_eq!(value.get("2"), Some(&Value::from("two")));
    }

    #[test]
    fn test_composite_map_keys_are_rejected() {
        let mut map = BTreeMap::new();
        map.insert((1, 2), "pair");
        assert!(matches!(convert(&map), Err(Error::UnsupportedType(_))));
    }
}
