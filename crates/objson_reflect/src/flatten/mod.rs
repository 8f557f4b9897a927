//! Conversion of object graphs into JSON-safe structures.
//!
//! [`Flatten`] is implemented for primitives, strings, timestamps, the
//! standard containers and, through `#[derive(Object)]`, for every object.
//! Flattening never fails; floats without a JSON form become
//! [`Value::Null`].

// -----------------------------------------------------------------------------
// Modules

mod impls;

// -----------------------------------------------------------------------------
// Flatten

use crate::reflect::{Object, public_attributes};
use crate::value::{Mapping, Value};

/// A value with a JSON-safe structural form.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use objson_reflect::{Flatten, Value};
///
/// let scores = BTreeMap::from([("Chika", vec![1, 2]), ("You", vec![])]);
/// let value = scores.flatten();
///
/// assert_eq!(value["Chika"][1], 2);
/// assert_eq!(value["You"], Value::List(vec![]));
/// ```
pub trait Flatten {
    fn flatten(&self) -> Value;
}

/// Flattens any [`Flatten`] value.
///
/// Flattening a [`Value`] yields an equal value, so the operation is
/// idempotent.
///
/// ```
/// use objson_reflect::{Object, flatten};
///
/// #[derive(Object, Default)]
/// #[objson(default)]
/// struct Member {
///     name: String,
///     age: Option<u32>,
/// }
///
/// let once = flatten(&Member { name: "Watanabe You".into(), age: None });
/// let twice = flatten(&once);
///
/// assert_eq!(once, twice);
/// assert!(once["age"].is_null());
/// ```
#[inline]
pub fn flatten<T: Flatten + ?Sized>(value: &T) -> Value {
    value.flatten()
}

/// Flattens an object into a [`Value::Map`] of its public attributes.
pub fn flatten_object(object: &dyn Object) -> Value {
    let attributes = public_attributes(object);
    let mut mapping = Mapping::with_capacity(attributes.len());
    for (name, value) in attributes {
        mapping.insert(name, value.flatten());
    }
    Value::Map(mapping)
}
