use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::flatten::Flatten;
use crate::reflect::Object;
use crate::value::Value;

/// A borrowed field or a computed property value.
pub enum AttributeValue<'a> {
    Stored(&'a dyn Flatten),
    Computed(Box<dyn Flatten + 'a>),
}

impl AttributeValue<'_> {
    #[inline]
    pub fn is_computed(&self) -> bool {
        matches!(self, Self::Computed(_))
    }
}

impl Flatten for AttributeValue<'_> {
    #[inline]
    fn flatten(&self) -> Value {
        match self {
            Self::Stored(value) => value.flatten(),
            Self::Computed(value) => value.flatten(),
        }
    }
}

/// Names starting with `_` never take part in serialization.
#[inline]
pub fn is_private(name: &str) -> bool {
    name.starts_with('_')
}

/// Lists the public attributes of `object`.
///
/// Stored fields come first, in declaration order, followed by properties.
/// A property sharing its name with a stored field replaces that field
/// in place, so every name is listed once. Private names are dropped
/// from both sources.
pub fn public_attributes(object: &dyn Object) -> Vec<(&'static str, AttributeValue<'_>)> {
    let mut attributes: Vec<(&'static str, AttributeValue<'_>)> = object
        .stored_attributes()
        .into_iter()
        .filter(|(name, _)| !is_private(name))
        .map(|(name, value)| (name, AttributeValue::Stored(value)))
        .collect();

    for (name, value) in object.properties() {
        if is_private(name) {
            continue;
        }
        match attributes.iter_mut().find(|(stored, _)| *stored == name) {
            Some(slot) => {
                log::warn!(
                    "property `{name}` of `{}` shadows a stored field of the same name",
                    object.reflect_class_meta().type_path(),
                );
                slot.1 = AttributeValue::Computed(value);
            }
            None => attributes.push((name, AttributeValue::Computed(value))),
        }
    }

    attributes
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::flatten::Flatten;
    use crate::hydrate::HydrateError;
    use crate::reflect::{Dynamic, Object, public_attributes};
    use crate::registry::{ClassMeta, GetClassMeta};
    use crate::value::Value;

    // Written by hand to cover what the derive never emits,
    // such as private property names and shadowing.
    struct Handmade {
        _foo: String,
        bar: i32,
        baz: i32,
    }

    impl Object for Handmade {
        fn reflect_class_meta(&self) -> ClassMeta {
            Self::class_meta()
        }

        fn stored_attributes(&self) -> Vec<(&'static str, &dyn Flatten)> {
            vec![
                ("_foo", &self._foo as &dyn Flatten),
                ("bar", &self.bar as &dyn Flatten),
                ("baz", &self.baz as &dyn Flatten),
            ]
        }

        fn properties(&self) -> Vec<(&'static str, Box<dyn Flatten + '_>)> {
            vec![
                ("foo", Box::new(&self._foo) as Box<dyn Flatten + '_>),
                ("_hidden", Box::new(1) as Box<dyn Flatten + '_>),
                ("bar", Box::new(self.bar * 10) as Box<dyn Flatten + '_>),
            ]
        }

        fn set_attribute(&mut self, name: &str, _value: Dynamic) -> Result<(), HydrateError> {
            Err(HydrateError::UnresolvableAttribute {
                type_path: core::any::type_name::<Self>(),
                name: name.into(),
            })
        }
    }

    impl GetClassMeta for Handmade {
        fn class_meta() -> ClassMeta {
            ClassMeta::of::<Self>()
        }
    }

    #[test]
    fn merge_order_and_privacy() {
        let object = Handmade {
            _foo: "foo".into(),
            bar: 2,
            baz: 3,
        };

        let attributes = public_attributes(&object);
        let names: Vec<_> = attributes.iter().map(|(name, _)| *name).collect();
        assert_eq!(names, ["bar", "baz", "foo"]);

        assert!(attributes[0].1.is_computed());
        assert_eq!(attributes[0].1.flatten(), Value::from(20));
        assert_eq!(attributes[1].1.flatten(), Value::from(3));
        assert_eq!(attributes[2].1.flatten(), Value::from("foo"));
    }
}
