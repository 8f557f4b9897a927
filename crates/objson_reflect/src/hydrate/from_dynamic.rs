use alloc::boxed::Box;
use alloc::collections::{BTreeMap, VecDeque};
use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::type_name;
use core::hash::{BuildHasher, Hash};
use std::collections::HashMap;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Utc};

use crate::hydrate::HydrateError;
use crate::reflect::{Dynamic, Object};
use crate::timestamp::Timestamp;
use crate::value::{Mapping, Value};

/// Conversion from a hydrated attribute into a field type.
///
/// Implemented for primitives, strings, timestamps, the standard
/// containers and every `#[derive(Object)]` type. Conversions check the
/// shape and never coerce between kinds, with two exceptions: integers
/// widen into floats, and strings parse into timestamp types.
///
/// # Examples
///
/// ```
/// use objson_reflect::{Dynamic, FromDynamic, Value};
///
/// let ok = Vec::<u8>::from_dynamic(Dynamic::Raw(Value::from_iter([Value::from(1)])));
/// assert_eq!(ok.unwrap(), [1]);
///
/// let err = String::from_dynamic(Dynamic::raw(5));
/// assert_eq!(err.unwrap_err().to_string(), "expected string, found number");
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be restored from a hydrated attribute",
    note = "consider annotating `{Self}` with `#[derive(Object)]`"
)]
pub trait FromDynamic: Sized {
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError>;
}

/// Moves the object out of `value` if it is a `T`.
///
/// Used by `#[derive(Object)]` to implement [`FromDynamic`].
pub fn downcast_object<T: Object>(value: Dynamic) -> Result<T, HydrateError> {
    match value {
        Dynamic::Object(object) => downcast_boxed(object),
        other => Err(HydrateError::incompatible(
            format!("object `{}`", type_name::<T>()),
            other.describe(),
        )),
    }
}

pub(crate) fn downcast_boxed<T: Object>(object: Box<dyn Object>) -> Result<T, HydrateError> {
    object.downcast::<T>().map(|boxed| *boxed).map_err(|object| {
        HydrateError::incompatible(
            format!("object `{}`", type_name::<T>()),
            Dynamic::Object(object).describe(),
        )
    })
}

// Only raw values pass; a hydrated list is folded back into a plain list.
fn into_raw(value: Dynamic, expected: &'static str) -> Result<Value, HydrateError> {
    match value {
        Dynamic::Raw(value) => Ok(value),
        Dynamic::List(_) => Value::from_dynamic(value),
        Dynamic::Object(_) => Err(HydrateError::incompatible(expected, value.describe())),
    }
}

// -----------------------------------------------------------------------------
// Structures

impl FromDynamic for Dynamic {
    #[inline]
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        Ok(value)
    }
}

impl FromDynamic for Value {
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        match value {
            Dynamic::Raw(value) => Ok(value),
            Dynamic::List(items) => items
                .into_iter()
                .map(Value::from_dynamic)
                .collect::<Result<Vec<_>, _>>()
                .map(Value::List),
            Dynamic::Object(_) => Err(HydrateError::incompatible("structure", value.describe())),
        }
    }
}

impl FromDynamic for Box<dyn Object> {
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        match value {
            Dynamic::Object(object) => Ok(object),
            other => Err(HydrateError::incompatible("object", other.describe())),
        }
    }
}

// -----------------------------------------------------------------------------
// Primitives

impl FromDynamic for () {
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        match into_raw(value, "null")? {
            Value::Null => Ok(()),
            other => Err(HydrateError::incompatible("null", other.kind())),
        }
    }
}

impl FromDynamic for bool {
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        match into_raw(value, "bool")? {
            Value::Bool(b) => Ok(b),
            other => Err(HydrateError::incompatible("bool", other.kind())),
        }
    }
}

macro_rules! impl_from_dynamic_integer {
    ($as:ident: $($ty:ty),* $(,)?) => {$(
        impl FromDynamic for $ty {
            fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
                let expected = stringify!($ty);
                match into_raw(value, expected)? {
                    Value::Number(n) => n
                        .$as()
                        .and_then(|n| <$ty>::try_from(n).ok())
                        .ok_or_else(|| HydrateError::incompatible(expected, format!("number {n}"))),
                    other => Err(HydrateError::incompatible(expected, other.kind())),
                }
            }
        }
    )*};
}

impl_from_dynamic_integer!(as_i64: i8, i16, i32, i64, isize);
impl_from_dynamic_integer!(as_u64: u8, u16, u32, u64, usize);

impl FromDynamic for f64 {
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        match into_raw(value, "f64")? {
            Value::Number(n) => n
                .as_f64()
                .ok_or_else(|| HydrateError::incompatible("f64", format!("number {n}"))),
            other => Err(HydrateError::incompatible("f64", other.kind())),
        }
    }
}

impl FromDynamic for f32 {
    #[inline]
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        f64::from_dynamic(value).map(|n| n as f32)
    }
}

impl FromDynamic for String {
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        match into_raw(value, "string")? {
            Value::String(s) => Ok(s),
            other => Err(HydrateError::incompatible("string", other.kind())),
        }
    }
}

// -----------------------------------------------------------------------------
// Timestamps

impl FromDynamic for Timestamp {
    /// Accepts a timestamp value or its ISO-8601 text.
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        match into_raw(value, "timestamp")? {
            Value::Timestamp(ts) => Ok(ts),
            Value::String(text) => Ok(Timestamp::parse(&text)?),
            other => Err(HydrateError::incompatible("timestamp", other.kind())),
        }
    }
}

impl FromDynamic for NaiveDateTime {
    /// Keeps the wall-clock time of offset-aware input.
    #[inline]
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        Timestamp::from_dynamic(value).map(|ts| ts.local())
    }
}

impl FromDynamic for DateTime<FixedOffset> {
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        Timestamp::from_dynamic(value)?
            .to_datetime()
            .ok_or_else(|| HydrateError::incompatible("timestamp with UTC offset", "naive timestamp"))
    }
}

impl FromDynamic for DateTime<Utc> {
    #[inline]
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        DateTime::<FixedOffset>::from_dynamic(value).map(|dt| dt.with_timezone(&Utc))
    }
}

// -----------------------------------------------------------------------------
// Containers

impl<T: FromDynamic> FromDynamic for Option<T> {
    #[inline]
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        if value.is_null() {
            return Ok(None);
        }
        T::from_dynamic(value).map(Some)
    }
}

impl<T: FromDynamic> FromDynamic for Box<T> {
    #[inline]
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        T::from_dynamic(value).map(Box::new)
    }
}

impl<T: FromDynamic> FromDynamic for Vec<T> {
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        match value {
            Dynamic::List(items) => items.into_iter().map(T::from_dynamic).collect(),
            Dynamic::Raw(Value::List(items)) => items
                .into_iter()
                .map(|item| T::from_dynamic(Dynamic::Raw(item)))
                .collect(),
            other => Err(HydrateError::incompatible("list", other.describe())),
        }
    }
}

impl<T: FromDynamic> FromDynamic for VecDeque<T> {
    #[inline]
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        Vec::<T>::from_dynamic(value).map(VecDeque::from)
    }
}

fn map_entries<T: FromDynamic>(
    value: Dynamic,
) -> Result<impl Iterator<Item = Result<(String, T), HydrateError>>, HydrateError> {
    match value {
        Dynamic::Raw(Value::Map(mapping)) => Ok(mapping.into_iter().map(|(key, value)| {
            T::from_dynamic(Dynamic::Raw(value)).map(|value| (key, value))
        })),
        other => Err(HydrateError::incompatible("mapping", other.describe())),
    }
}

impl<T: FromDynamic> FromDynamic for Mapping<T> {
    #[inline]
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        map_entries(value)?.collect()
    }
}

impl<T: FromDynamic> FromDynamic for BTreeMap<String, T> {
    #[inline]
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        map_entries(value)?.collect()
    }
}

impl<T: FromDynamic, S: BuildHasher + Default> FromDynamic for HashMap<String, T, S> {
    #[inline]
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        map_entries(value)?.collect()
    }
}

impl<K, T, S> FromDynamic for objson_utils::hash::HashMap<K, T, S>
where
    K: From<String> + Eq + Hash,
    T: FromDynamic,
    S: BuildHasher + Default,
{
    fn from_dynamic(value: Dynamic) -> Result<Self, HydrateError> {
        map_entries(value)?
            .map(|entry| entry.map(|(key, value)| (K::from(key), value)))
            .collect()
    }
}
