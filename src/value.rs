//! Template parameters as a dynamic tree.
//!
//! Every parameter handed to the formatter becomes a [`Value`], either
//! directly or through [`to_value`](crate::to_value) for any
//! `T: Serialize`. Placeholders are resolved against this tree and render
//! its [`Display`](fmt::Display) text when no modifier changes it:
//!
//! ```rust
//! use textfmt::Value;
//!
//! assert_eq!(Value::Null.to_string(), "");
//! assert_eq!(Value::from(42).to_string(), "42");
//! assert_eq!(Value::from(vec![Value::from(1), Value::from(2)]).to_string(), "[1, 2]");
//! ```
//!
//! ## Closed Values
//!
//! Only objects have named properties. Every other kind, arrays included,
//! is *closed*: a placeholder naming a property a closed parameter lacks
//! resolves to the parameter itself.
//!
//! ```rust
//! use textfmt::{params, Value};
//!
//! assert!(Value::from("Bo").is_closed());
//! assert!(params!(["a", "b"]).is_closed());
//! assert!(!params!({ "name": "Bo" }).is_closed());
//! ```

use crate::ValueMap;
use chrono::{DateTime, Utc};
use num_bigint::BigInt;
use serde::de::{self, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A dynamically-typed template parameter.
///
/// Dates keep their type so that `%` patterns can format them; integers
/// outside the `i64` range are kept as [`BigInt`].
#[derive(Clone, Debug, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Object(ValueMap),
    Date(DateTime<Utc>),
    BigInt(BigInt),
}

/// A number as decimal patterns see it.
///
/// Non-finite floats get their own variants so that patterns can render
/// them without inspecting the float.
#[derive(Clone, Debug, PartialEq)]
pub enum Number {
    Integer(i64),
    Float(f64),
    Infinity,
    NegativeInfinity,
    NaN,
}

impl From<f64> for Number {
    fn from(value: f64) -> Self {
        if value.is_nan() {
            Number::NaN
        } else if value.is_infinite() {
            if value > 0.0 {
                Number::Infinity
            } else {
                Number::NegativeInfinity
            }
        } else {
            Number::Float(value)
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Number::Integer(i) => write!(f, "{}", i),
            Number::Float(v) => write!(f, "{}", v),
            Number::Infinity => f.write_str("Infinity"),
            Number::NegativeInfinity => f.write_str("-Infinity"),
            Number::NaN => f.write_str("NaN"),
        }
    }
}

impl Value {
    #[inline]
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    #[must_use]
    pub const fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    /// Returns `true` unless the value has named properties, which only
    /// objects do.
    #[inline]
    #[must_use]
    pub const fn is_closed(&self) -> bool {
        !self.is_object()
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&ValueMap> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up one path segment: an object key or a decimal array index.
    #[must_use]
    pub fn get(&self, segment: &str) -> Option<&Value> {
        match self {
            Value::Object(map) => map.get(segment),
            Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
            _ => None,
        }
    }

    /// Follows a dotted property path such as `user.address.city` or `items.0.name`.
    ///
    /// Returns `None` as soon as a segment is missing or empty.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use textfmt::{params, Value};
    ///
    /// let value = params!({ "user": { "tags": ["a", "b"] } });
    /// assert_eq!(value.get_path("user.tags.1"), Some(&Value::from("b")));
    /// assert_eq!(value.get_path("user.missing"), None);
    /// assert_eq!(value.get_path("user..tags"), None);
    /// ```
    #[must_use]
    pub fn get_path(&self, path: &str) -> Option<&Value> {
        path.split('.')
            .try_fold(self, |current, segment| match segment {
                "" => None,
                segment => current.get(segment),
            })
    }
}

/// Writes `items` separated by `", "`.
fn write_list<I, F>(f: &mut fmt::Formatter<'_>, items: I, mut write: F) -> fmt::Result
where
    I: IntoIterator,
    F: FnMut(&mut fmt::Formatter<'_>, I::Item) -> fmt::Result,
{
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write(f, item)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => write!(f, "{}", n),
            Value::String(s) => f.write_str(s),
            Value::Array(items) => {
                f.write_str("[")?;
                write_list(f, items, |f, item| write!(f, "{}", item))?;
                f.write_str("]")
            }
            Value::Object(map) => {
                f.write_str("{")?;
                write_list(f, map.iter(), |f, (key, value)| write!(f, "{}={}", key, value))?;
                f.write_str("}")
            }
            Value::Date(date) => f.write_str(&date.to_rfc3339()),
            Value::BigInt(big) => write!(f, "{}", big),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(Number::Integer(i)) => serializer.serialize_i64(*i),
            Value::Number(Number::Float(v)) => serializer.serialize_f64(*v),
            Value::Number(Number::Infinity) => serializer.serialize_f64(f64::INFINITY),
            Value::Number(Number::NegativeInfinity) => serializer.serialize_f64(f64::NEG_INFINITY),
            Value::Number(Number::NaN) => serializer.serialize_f64(f64::NAN),
            Value::String(s) => serializer.serialize_str(s),
            Value::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                items.iter().try_for_each(|item| seq.serialize_element(item))?;
                seq.end()
            }
            Value::Object(map) => {
                let mut out = serializer.serialize_map(Some(map.len()))?;
                map.iter()
                    .try_for_each(|(key, value)| out.serialize_entry(key, value))?;
                out.end()
            }
            Value::Date(date) => serializer.collect_str(&date.to_rfc3339()),
            Value::BigInt(big) => serializer.collect_str(big),
        }
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a template parameter")
    }

    fn visit_bool<E>(self, value: bool) -> Result<Value, E> {
        Ok(Value::Bool(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_u64<E>(self, value: u64) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_f64<E>(self, value: f64) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_str<E>(self, value: &str) -> Result<Value, E> {
        Ok(Value::from(value))
    }

    fn visit_string<E>(self, value: String) -> Result<Value, E> {
        Ok(Value::String(value))
    }

    fn visit_unit<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Array(items))
    }

    fn visit_map<A: de::MapAccess<'de>>(self, mut access: A) -> Result<Value, A::Error> {
        let mut map = ValueMap::with_capacity(access.size_hint().unwrap_or(0));
        while let Some((key, value)) = access.next_entry()? {
            map.insert(key, value);
        }
        Ok(Value::Object(map))
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

macro_rules! from_small_integer {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                Value::Number(Number::Integer(i64::from(value)))
            }
        }
    )*};
}

macro_rules! from_wide_integer {
    ($($ty:ty),*) => {$(
        impl From<$ty> for Value {
            fn from(value: $ty) -> Self {
                i64::try_from(value)
                    .map(|i| Value::Number(Number::Integer(i)))
                    .unwrap_or_else(|_| Value::BigInt(BigInt::from(value)))
            }
        }
    )*};
}

from_small_integer!(i8, i16, i32, i64, u8, u16, u32);
from_wide_integer!(u64, usize, i128, u128);

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number(Number::from(value))
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_owned())
    }
}

impl From<Vec<Value>> for Value {
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<ValueMap> for Value {
    fn from(value: ValueMap) -> Self {
        Value::Object(value)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(value: DateTime<Utc>) -> Self {
        Value::Date(value)
    }
}

impl From<BigInt> for Value {
    fn from(value: BigInt) -> Self {
        Value::BigInt(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
