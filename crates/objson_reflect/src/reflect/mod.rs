//! Attribute reflection over user types.
//!
//! [`Object`] is the one trait every serializable type implements, usually
//! through `#[derive(Object)]`. It exposes two sources of attributes:
//! stored fields and getter-backed properties. [`public_attributes`] merges
//! them into the ordered list that flattening walks.

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod dynamic;

// -----------------------------------------------------------------------------
// Exports

pub use attributes::{AttributeValue, is_private, public_attributes};
pub use dynamic::Dynamic;

// -----------------------------------------------------------------------------
// Object

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::fmt;

use crate::flatten::Flatten;
use crate::hydrate::HydrateError;
use crate::registry::ClassMeta;

/// A type whose attributes can be enumerated and assigned by name.
///
/// Implementations are normally generated by `#[derive(Object)]`,
/// which also implements [`GetClassMeta`](crate::registry::GetClassMeta),
/// [`Flatten`] and [`FromDynamic`](crate::hydrate::FromDynamic).
///
/// # Examples
///
/// ```
/// use objson_reflect::{Object, public_attributes};
///
/// #[derive(Object, Default)]
/// #[objson(default)]
/// struct Member {
///     name: String,
///     _secret: u32,
/// }
///
/// let member = Member { name: "Kurosawa Dia".into(), _secret: 7 };
/// let names: Vec<_> = public_attributes(&member)
///     .into_iter()
///     .map(|(name, _)| name)
///     .collect();
///
/// assert_eq!(names, ["name"]);
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Object`",
    note = "consider annotating `{Self}` with `#[derive(Object)]`"
)]
pub trait Object: Any + Send + Sync {
    /// Returns the [`ClassMeta`] of the underlying type.
    fn reflect_class_meta(&self) -> ClassMeta;

    /// Stored fields, in declaration order.
    ///
    /// Names starting with `_` may be listed; they are filtered out by
    /// [`public_attributes`].
    fn stored_attributes(&self) -> Vec<(&'static str, &dyn Flatten)>;

    /// Computed properties, in declaration order.
    ///
    /// A property named like a stored field takes that field's place.
    fn properties(&self) -> Vec<(&'static str, Box<dyn Flatten + '_>)> {
        Vec::new()
    }

    /// Assigns `value` to the field or settable property called `name`.
    ///
    /// Unknown names fail with [`HydrateError::UnresolvableAttribute`].
    fn set_attribute(&mut self, name: &str, value: Dynamic) -> Result<(), HydrateError>;
}

impl dyn Object {
    /// Returns the [`TypeId`] of the underlying type.
    #[inline]
    pub fn ty_id(&self) -> TypeId {
        let any: &dyn Any = self;
        any.type_id()
    }

    /// Returns `true` if the underlying value is of type `T`.
    #[inline]
    pub fn is<T: Object>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    #[inline]
    pub fn downcast_ref<T: Object>(&self) -> Option<&T> {
        let any: &dyn Any = self;
        any.downcast_ref()
    }

    #[inline]
    pub fn downcast_mut<T: Object>(&mut self) -> Option<&mut T> {
        let any: &mut dyn Any = self;
        any.downcast_mut()
    }

    /// Downcasts a boxed object, handing the box back on mismatch.
    pub fn downcast<T: Object>(self: Box<Self>) -> Result<Box<T>, Box<dyn Object>> {
        if !self.is::<T>() {
            return Err(self);
        }
        let any: Box<dyn Any> = self;
        match any.downcast() {
            Ok(value) => Ok(value),
            Err(_) => unreachable!("type id was checked above"),
        }
    }
}

impl fmt::Debug for dyn Object {
    /// Renders the public attributes in their flattened form.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meta = self.reflect_class_meta();
        let mut out = f.debug_struct(meta.type_name());
        for (name, value) in public_attributes(self) {
            out.field(name, &value.flatten());
        }
        out.finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::format;
    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::hydrate::HydrateError;
    use crate::reflect::{Dynamic, public_attributes};
    use crate::{Object, flatten, hydrate_as};

    #[derive(Object, Default)]
    #[objson(default)]
    struct Unit {
        name: String,
        hp: u32,
    }

    #[derive(Object, Default)]
    #[objson(default)]
    struct Other {
        name: String,
    }

    #[test]
    fn downcasting() {
        let mut object: Box<dyn Object> = Box::new(Unit {
            name: "Riko".into(),
            hp: 3,
        });

        assert!(object.is::<Unit>());
        assert!(!object.is::<Other>());
        assert!(object.downcast_ref::<Other>().is_none());

        object.downcast_mut::<Unit>().unwrap().hp = 4;

        let Err(object) = object.downcast::<Other>() else {
            panic!("downcast to the wrong type succeeded");
        };
        let unit = object.downcast::<Unit>().unwrap();
        assert_eq!(unit.hp, 4);
    }

    #[test]
    fn debug_shows_flattened_attributes() {
        let object: Box<dyn Object> = Box::new(Unit {
            name: "Riko".into(),
            hp: 3,
        });
        let text = format!("{object:?}");
        assert!(text.starts_with("Unit { name: String(\"Riko\"), hp: "));
        assert!(text.contains('3'));
    }

    #[derive(Object, Default)]
    #[objson(default, property(name = "title", get = display_title))]
    struct Shaped {
        r#type: String,
        #[objson(skip)]
        scratch: u32,
        _private: u32,
        title_raw: String,
    }

    impl Shaped {
        fn display_title(&self) -> String {
            self.title_raw.to_uppercase()
        }
    }

    #[test]
    fn derived_attribute_names() {
        let mut shaped = Shaped {
            r#type: "unit".into(),
            scratch: 1,
            _private: 2,
            title_raw: "aqours".into(),
        };

        let names: Vec<_> = public_attributes(&shaped)
            .into_iter()
            .map(|(name, _)| name)
            .collect();
        assert_eq!(names, ["type", "title_raw", "title"]);
        assert_eq!(flatten(&shaped)["title"], "AQOURS");

        shaped.set_attribute("type", Dynamic::raw("group")).unwrap();
        assert_eq!(shaped.r#type, "group");

        // Read-only properties and skipped fields cannot be assigned.
        for name in ["title", "scratch", "_private"] {
            let err = shaped.set_attribute(name, Dynamic::raw(3)).unwrap_err();
            assert!(matches!(err, HydrateError::UnresolvableAttribute { .. }));
        }
        assert_eq!((shaped.scratch, shaped._private), (1, 2));
    }

    #[derive(Object, Default)]
    #[objson(default)]
    struct Labeled<T> {
        label: String,
        value: T,
    }

    #[test]
    fn generic_objects() {
        let labeled = Labeled {
            label: "seats".into(),
            value: 17000_u32,
        };

        let structure = flatten(&labeled);
        assert_eq!(structure["value"], 17000);

        let back = hydrate_as::<Labeled<u32>>(structure).unwrap().unwrap();
        assert_eq!((back.label.as_str(), back.value), ("seats", 17000));
    }
}
