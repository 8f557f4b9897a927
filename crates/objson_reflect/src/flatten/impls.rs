use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::collections::{BTreeMap, VecDeque};
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::hash::BuildHasher;
use std::collections::HashMap;

use chrono::{DateTime, NaiveDateTime, TimeZone};

use crate::flatten::{Flatten, flatten_object};
use crate::reflect::Object;
use crate::timestamp::Timestamp;
use crate::value::{Mapping, Value};

// -----------------------------------------------------------------------------
// Leaves

impl Flatten for Value {
    /// Values are already JSON-safe.
    #[inline]
    fn flatten(&self) -> Value {
        self.clone()
    }
}

impl Flatten for () {
    #[inline]
    fn flatten(&self) -> Value {
        Value::Null
    }
}

macro_rules! impl_flatten_via_from {
    ($($ty:ty),* $(,)?) => {$(
        impl Flatten for $ty {
            #[inline]
            fn flatten(&self) -> Value {
                Value::from(*self)
            }
        }
    )*};
}

impl_flatten_via_from!(bool, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl Flatten for str {
    #[inline]
    fn flatten(&self) -> Value {
        Value::String(self.into())
    }
}

impl Flatten for String {
    #[inline]
    fn flatten(&self) -> Value {
        Value::String(self.clone())
    }
}

impl Flatten for Cow<'_, str> {
    #[inline]
    fn flatten(&self) -> Value {
        Value::String(self.as_ref().into())
    }
}

impl Flatten for char {
    #[inline]
    fn flatten(&self) -> Value {
        Value::String(String::from(*self))
    }
}

impl Flatten for Timestamp {
    #[inline]
    fn flatten(&self) -> Value {
        Value::Timestamp(*self)
    }
}

impl Flatten for NaiveDateTime {
    #[inline]
    fn flatten(&self) -> Value {
        Value::Timestamp(Timestamp::naive(*self))
    }
}

impl<Tz: TimeZone> Flatten for DateTime<Tz> {
    #[inline]
    fn flatten(&self) -> Value {
        Value::Timestamp(Timestamp::from(self.clone()))
    }
}

// -----------------------------------------------------------------------------
// Objects and indirection

impl Flatten for dyn Object {
    #[inline]
    fn flatten(&self) -> Value {
        flatten_object(self)
    }
}

impl<T: Flatten + ?Sized> Flatten for &T {
    #[inline]
    fn flatten(&self) -> Value {
        (**self).flatten()
    }
}

impl<T: Flatten + ?Sized> Flatten for Box<T> {
    #[inline]
    fn flatten(&self) -> Value {
        (**self).flatten()
    }
}

impl<T: Flatten + ?Sized> Flatten for Arc<T> {
    #[inline]
    fn flatten(&self) -> Value {
        (**self).flatten()
    }
}

impl<T: Flatten> Flatten for Option<T> {
    #[inline]
    fn flatten(&self) -> Value {
        match self {
            Some(value) => value.flatten(),
            None => Value::Null,
        }
    }
}

// -----------------------------------------------------------------------------
// Sequences

impl<T: Flatten> Flatten for [T] {
    fn flatten(&self) -> Value {
        Value::List(self.iter().map(Flatten::flatten).collect())
    }
}

impl<T: Flatten, const N: usize> Flatten for [T; N] {
    #[inline]
    fn flatten(&self) -> Value {
        self.as_slice().flatten()
    }
}

impl<T: Flatten> Flatten for Vec<T> {
    #[inline]
    fn flatten(&self) -> Value {
        self.as_slice().flatten()
    }
}

impl<T: Flatten> Flatten for VecDeque<T> {
    fn flatten(&self) -> Value {
        Value::List(self.iter().map(Flatten::flatten).collect())
    }
}

// -----------------------------------------------------------------------------
// Mappings

fn flatten_entries<'a, K, V>(entries: impl Iterator<Item = (&'a K, &'a V)>) -> Value
where
    K: AsRef<str> + ?Sized + 'a,
    V: Flatten + 'a,
{
    let mut mapping = Mapping::new();
    for (key, value) in entries {
        mapping.insert(key.as_ref(), value.flatten());
    }
    Value::Map(mapping)
}

impl<V: Flatten> Flatten for Mapping<V> {
    fn flatten(&self) -> Value {
        let mut mapping = Mapping::with_capacity(self.len());
        for (key, value) in self {
            mapping.insert(key, value.flatten());
        }
        Value::Map(mapping)
    }
}

impl<K: AsRef<str>, V: Flatten> Flatten for BTreeMap<K, V> {
    #[inline]
    fn flatten(&self) -> Value {
        flatten_entries(self.iter())
    }
}

impl<K: AsRef<str>, V: Flatten, S: BuildHasher> Flatten for HashMap<K, V, S> {
    #[inline]
    fn flatten(&self) -> Value {
        flatten_entries(self.iter())
    }
}

impl<K: AsRef<str>, V: Flatten, S: BuildHasher> Flatten for objson_utils::hash::HashMap<K, V, S> {
    #[inline]
    fn flatten(&self) -> Value {
        flatten_entries(self.iter())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use chrono::NaiveDate;

    use crate::flatten::flatten;
    use crate::timestamp::Timestamp;
    use crate::value::{Mapping, Value};

    #[test]
    fn primitives_and_null() {
        assert_eq!(flatten(&1_u8), 1);
        assert_eq!(flatten(&-3_i64), -3);
        assert_eq!(flatten(&2.5_f32), 2.5);
        assert_eq!(flatten(&f64::NAN), Value::Null);
        assert_eq!(flatten("x"), "x");
        assert_eq!(flatten(&'c'), "c");
        assert_eq!(flatten(&None::<i32>), Value::Null);
        assert_eq!(flatten(&Some(true)), true);
        assert_eq!(flatten(&()), Value::Null);
    }

    #[test]
    fn containers() {
        let list = flatten(&vec![vec![1], vec![]]);
        assert_eq!(list[0][0], 1);
        assert_eq!(list[1], Value::List(vec![]));

        let mut map = HashMap::new();
        map.insert("k".to_owned(), Some("v"));
        map.insert("n".to_owned(), None);
        let value = flatten(&map);
        assert_eq!(value["k"], "v");
        assert!(value.get("n").is_some_and(Value::is_null));
    }

    #[test]
    fn timestamps_stay_opaque() {
        let local = NaiveDate::from_ymd_opt(2019, 8, 11)
            .unwrap()
            .and_hms_opt(6, 10, 24)
            .unwrap();
        assert_eq!(flatten(&local), Value::Timestamp(Timestamp::naive(local)));

        let utc = local.and_utc();
        assert_eq!(flatten(&utc), Value::Timestamp(Timestamp::from(utc)));
    }

    #[test]
    fn idempotent_on_structures() {
        let mut inner = Mapping::new();
        inner.insert("a", Value::List(vec![Value::from(1), Value::Null]));
        let mut outer = Mapping::new();
        outer.insert("inner", Value::Map(inner));
        outer.insert("s", Value::from("x"));
        let value = Value::Map(outer);

        assert_eq!(flatten(&value), value);
        assert_eq!(flatten(&flatten(&value)), value);
    }
}
