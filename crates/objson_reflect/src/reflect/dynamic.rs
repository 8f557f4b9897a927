use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;

use crate::flatten::{Flatten, flatten_object};
use crate::reflect::Object;
use crate::value::Value;

/// A hydrated attribute value, before it is converted into a field type.
///
/// Only attributes with a type hint produce objects; everything else
/// arrives as [`Dynamic::Raw`]. A field typed as `Dynamic` keeps the
/// value as is, which suits members mixing objects and plain values.
///
/// # Examples
///
/// ```
/// use objson_reflect::{Dynamic, Object, flatten};
///
/// #[derive(Object, Default)]
/// #[objson(default)]
/// struct Tag {
///     label: String,
/// }
///
/// let mixed = Dynamic::List(vec![
///     Dynamic::raw("plain"),
///     Dynamic::object(Tag { label: "boxed".into() }),
/// ]);
///
/// let value = flatten(&mixed);
/// assert_eq!(value[0], "plain");
/// assert_eq!(value[1]["label"], "boxed");
/// ```
#[derive(Debug)]
pub enum Dynamic {
    Raw(Value),
    Object(Box<dyn Object>),
    List(Vec<Dynamic>),
}

impl Dynamic {
    #[inline]
    pub fn raw(value: impl Into<Value>) -> Self {
        Self::Raw(value.into())
    }

    #[inline]
    pub fn object<T: Object>(object: T) -> Self {
        Self::Object(Box::new(object))
    }

    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Raw(Value::Null))
    }

    #[inline]
    pub const fn as_raw(&self) -> Option<&Value> {
        match self {
            Self::Raw(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_object(&self) -> Option<&dyn Object> {
        match self {
            Self::Object(object) => Some(&**object),
            _ => None,
        }
    }

    #[inline]
    pub fn as_list(&self) -> Option<&[Dynamic]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    /// Returns the object if it is of type `T`.
    #[inline]
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        self.as_object()?.downcast_ref()
    }

    /// Describes the shape of this value for error messages.
    pub fn describe(&self) -> Cow<'static, str> {
        match self {
            Self::Raw(value) => value.kind().into(),
            Self::Object(object) => {
                format!("object `{}`", object.reflect_class_meta().type_path()).into()
            }
            Self::List(_) => Cow::Borrowed("list"),
        }
    }
}

impl From<Value> for Dynamic {
    #[inline]
    fn from(value: Value) -> Self {
        Self::Raw(value)
    }
}

impl From<Box<dyn Object>> for Dynamic {
    #[inline]
    fn from(object: Box<dyn Object>) -> Self {
        Self::Object(object)
    }
}

impl Flatten for Dynamic {
    fn flatten(&self) -> Value {
        match self {
            Self::Raw(value) => value.flatten(),
            Self::Object(object) => flatten_object(&**object),
            Self::List(items) => Value::List(items.iter().map(Flatten::flatten).collect()),
        }
    }
}

impl Default for Dynamic {
    #[inline]
    fn default() -> Self {
        Self::Raw(Value::Null)
    }
}
