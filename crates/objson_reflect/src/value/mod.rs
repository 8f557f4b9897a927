//! The JSON-safe structure produced by flattening and consumed by hydration.
//!
//! A [`Value`] only holds what JSON text can carry, plus [`Timestamp`]
//! as an opaque leaf. Timestamps turn into strings when the value is
//! written out as text, see [`crate::text`].

// -----------------------------------------------------------------------------
// Modules

mod de;
mod mapping;
mod ser;

// -----------------------------------------------------------------------------
// Exports

pub use mapping::{IntoIter, Iter, IterMut, Mapping};
pub use serde_json::Number;

// -----------------------------------------------------------------------------
// Value

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::ops::Index;

use crate::timestamp::Timestamp;

/// A JSON-safe tree.
///
/// # Examples
///
/// ```
/// use objson_reflect::value::{Mapping, Value};
///
/// let mut member = Mapping::new();
/// member.insert("name", Value::from("Takami Chika"));
/// member.insert("age", Value::from(16));
///
/// let group = Value::List(vec![Value::Map(member)]);
///
/// assert_eq!(group[0]["name"], "Takami Chika");
/// assert_eq!(group[0]["age"], 16);
/// assert!(group[0]["missing"].is_null());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    /// Opaque until text encoding, where it becomes an ISO-8601 string.
    Timestamp(Timestamp),
    List(Vec<Value>),
    Map(Mapping),
}

/// The shape of a [`Value`], used in error messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
    Bool,
    Number,
    String,
    Timestamp,
    List,
    Map,
}

impl ValueKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Bool => "bool",
            Self::Number => "number",
            Self::String => "string",
            Self::Timestamp => "timestamp",
            Self::List => "list",
            Self::Map => "mapping",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ValueKind> for Cow<'static, str> {
    #[inline]
    fn from(kind: ValueKind) -> Self {
        Cow::Borrowed(kind.as_str())
    }
}

impl Value {
    pub const fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Bool(_) => ValueKind::Bool,
            Self::Number(_) => ValueKind::Number,
            Self::String(_) => ValueKind::String,
            Self::Timestamp(_) => ValueKind::Timestamp,
            Self::List(_) => ValueKind::List,
            Self::Map(_) => ValueKind::Map,
        }
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[inline]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[inline]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[inline]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_timestamp(&self) -> Option<&Timestamp> {
        match self {
            Self::Timestamp(ts) => Some(ts),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list_mut(&mut self) -> Option<&mut Vec<Value>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    #[inline]
    pub const fn as_map(&self) -> Option<&Mapping> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    #[inline]
    pub fn as_map_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Self::Map(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up `key` when this value is a mapping.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.as_map().and_then(|map| map.get(key))
    }

    /// Replaces this value with [`Value::Null`] and returns the old one.
    #[inline]
    pub fn take(&mut self) -> Value {
        core::mem::take(self)
    }
}

static NULL: Value = Value::Null;

impl Index<&str> for Value {
    type Output = Value;

    /// Missing keys and non-mapping values index to [`Value::Null`].
    fn index(&self, key: &str) -> &Value {
        self.get(key).unwrap_or(&NULL)
    }
}

impl Index<usize> for Value {
    type Output = Value;

    /// Out-of-range indices and non-list values index to [`Value::Null`].
    fn index(&self, index: usize) -> &Value {
        self.as_list()
            .and_then(|items| items.get(index))
            .unwrap_or(&NULL)
    }
}

// -----------------------------------------------------------------------------
// Conversions

macro_rules! impl_from_integer {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for Value {
            #[inline]
            fn from(value: $ty) -> Self {
                Self::Number(Number::from(value))
            }
        }
    )*};
}

impl_from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    /// Non-finite floats have no JSON form and become [`Value::Null`].
    #[inline]
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Self::Null, Self::Number)
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Self::from(f64::from(value))
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Number> for Value {
    #[inline]
    fn from(value: Number) -> Self {
        Self::Number(value)
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Self::String(value.into())
    }
}

impl From<Timestamp> for Value {
    #[inline]
    fn from(value: Timestamp) -> Self {
        Self::Timestamp(value)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Self::List(value)
    }
}

impl From<Mapping> for Value {
    #[inline]
    fn from(value: Mapping) -> Self {
        Self::Map(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl FromIterator<Value> for Value {
    #[inline]
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::List(iter.into_iter().collect())
    }
}

// -----------------------------------------------------------------------------
// Comparisons with plain values

impl PartialEq<str> for Value {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.as_str() == Some(other)
    }
}

impl PartialEq<&str> for Value {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.as_str() == Some(*other)
    }
}

impl PartialEq<String> for Value {
    #[inline]
    fn eq(&self, other: &String) -> bool {
        self.as_str() == Some(other.as_str())
    }
}

impl PartialEq<bool> for Value {
    #[inline]
    fn eq(&self, other: &bool) -> bool {
        self.as_bool() == Some(*other)
    }
}

impl PartialEq<f64> for Value {
    #[inline]
    fn eq(&self, other: &f64) -> bool {
        self.as_f64() == Some(*other)
    }
}

macro_rules! impl_eq_signed {
    ($($ty:ty),* $(,)?) => {$(
        impl PartialEq<$ty> for Value {
            #[inline]
            fn eq(&self, other: &$ty) -> bool {
                self.as_i64() == Some(i64::from(*other))
            }
        }
    )*};
}

macro_rules! impl_eq_unsigned {
    ($($ty:ty),* $(,)?) => {$(
        impl PartialEq<$ty> for Value {
            #[inline]
            fn eq(&self, other: &$ty) -> bool {
                self.as_u64() == Some(u64::from(*other))
            }
        }
    )*};
}

impl_eq_signed!(i8, i16, i32, i64);
impl_eq_unsigned!(u8, u16, u32, u64);

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::{Mapping, Value, ValueKind};

    #[test]
    fn conversions() {
        assert_eq!(Value::from(1), 1);
        assert_eq!(Value::from(1.5_f64), 1.5);
        assert_eq!(Value::from(f64::NAN), Value::Null);
        assert_eq!(Value::from(f64::INFINITY), Value::Null);
        assert_eq!(Value::from(Some("x")), "x");
        assert_eq!(Value::from(None::<&str>), Value::Null);
        assert_eq!(Value::from(true), true);
    }

    #[test]
    fn indexing_never_panics() {
        let mut inner = Mapping::new();
        inner.insert("k", Value::from(2));
        let value = Value::List(vec![Value::Map(inner)]);

        assert_eq!(value[0]["k"], 2);
        assert!(value[1].is_null());
        assert!(value[0]["nope"].is_null());
        assert!(value["k"].is_null());
        assert_eq!(value.kind(), ValueKind::List);
        assert_eq!(value[0].kind().as_str(), "mapping");
    }
}
