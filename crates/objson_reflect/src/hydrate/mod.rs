//! Rebuilding object graphs from JSON-safe structures.
//!
//! Hydration starts from a root [`ClassMeta`] and a [`Value::Map`]:
//!
//! 1. Build the instance, through the class's factory hook if it has one,
//!    otherwise through its zero-argument constructor. The factory hook
//!    removes the keys it consumed.
//! 2. For every remaining key, consult the class's [`TypeHints`]. A hinted
//!    mapping hydrates into an object of the hinted class, and so does each
//!    mapping element of a hinted list. Anything else stays raw.
//! 3. Assign the result with [`Object::set_attribute`], which converts it
//!    into the field type through [`FromDynamic`].
//!
//! Nested classes are only rebuilt where a hint says so. A field holding an
//! object without a hint receives a raw mapping and fails to convert.
//!
//! [`TypeHints`]: crate::registry::TypeHints

// -----------------------------------------------------------------------------
// Modules

mod error;
mod from_dynamic;

// -----------------------------------------------------------------------------
// Exports

pub use error::HydrateError;
pub use from_dynamic::{FromDynamic, downcast_object};

// -----------------------------------------------------------------------------
// Hydrate

use alloc::boxed::Box;
use alloc::format;
use alloc::vec::Vec;

use crate::reflect::{Dynamic, Object};
use crate::registry::{ClassMeta, GetClassMeta};
use crate::value::{Mapping, Value};

use from_dynamic::downcast_boxed;

/// Hydrates `structure` into an instance of `class`.
///
/// [`Value::Null`] yields `Ok(None)`; any other non-mapping structure is
/// an [`HydrateError::IncompatibleType`].
///
/// # Examples
///
/// ```
/// use objson_reflect::{Object, Value, hydrate, registry::GetClassMeta};
///
/// #[derive(Object, Default)]
/// #[objson(default)]
/// struct Member {
///     name: String,
/// }
///
/// let structure: Value = serde_json::from_str(r#"{"name": "Ohara Mari"}"#).unwrap();
/// let object = hydrate(structure, &Member::class_meta()).unwrap().unwrap();
///
/// assert_eq!(object.downcast_ref::<Member>().unwrap().name, "Ohara Mari");
/// assert!(hydrate(Value::Null, &Member::class_meta()).unwrap().is_none());
/// ```
pub fn hydrate(structure: Value, class: &ClassMeta) -> Result<Option<Box<dyn Object>>, HydrateError> {
    match structure {
        Value::Null => Ok(None),
        Value::Map(mapping) => hydrate_mapping(mapping, class).map(Some),
        other => Err(HydrateError::incompatible(
            format!("mapping for `{}`", class.type_path()),
            other.kind(),
        )),
    }
}

/// Typed form of [`hydrate`].
///
/// Fails with [`HydrateError::IncompatibleType`] if a factory hook
/// returns an instance of another class.
pub fn hydrate_as<T: GetClassMeta>(structure: Value) -> Result<Option<T>, HydrateError> {
    hydrate(structure, &T::class_meta())?
        .map(downcast_boxed::<T>)
        .transpose()
}

/// Hydrates a mapping into an instance of `class`.
pub fn hydrate_mapping(mut mapping: Mapping, class: &ClassMeta) -> Result<Box<dyn Object>, HydrateError> {
    log::trace!("hydrating `{}` from {} keys", class.type_path(), mapping.len());

    let mut instance = instantiate(&mut mapping, class)?;
    let hints = class.type_hints();

    for (name, value) in mapping {
        let value = restore(value, hints.get(&name))
            .map_err(|error| error.in_attribute(class.type_path(), &name))?;
        instance.set_attribute(&name, value)?;
    }

    Ok(instance)
}

fn instantiate(mapping: &mut Mapping, class: &ClassMeta) -> Result<Box<dyn Object>, HydrateError> {
    if let Some(factory) = class.factory() {
        log::debug!("building `{}` through its factory hook", class.type_path());
        return factory(mapping);
    }
    match class.constructor() {
        Some(constructor) => Ok(constructor()),
        None => Err(HydrateError::MissingConstructionPath {
            type_path: class.type_path(),
        }),
    }
}

// A hinted list is rebuilt one level deep; inner lists stay raw.
fn restore(value: Value, hint: Option<&ClassMeta>) -> Result<Dynamic, HydrateError> {
    let Some(class) = hint else {
        return Ok(Dynamic::Raw(value));
    };

    match value {
        Value::Map(mapping) => hydrate_mapping(mapping, class).map(Dynamic::Object),
        Value::List(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Map(mapping) => hydrate_mapping(mapping, class).map(Dynamic::Object),
                other => {
                    log::debug!(
                        "leaving {} element raw under a `{}` hint",
                        other.kind(),
                        class.type_name(),
                    );
                    Ok(Dynamic::Raw(other))
                }
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Dynamic::List),
        other => Ok(Dynamic::Raw(other)),
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::string::String;
    use alloc::vec::Vec;

    use crate::hydrate::{HydrateError, hydrate, hydrate_as};
    use crate::Object;
    use crate::reflect::Dynamic;
    use crate::registry::GetClassMeta;
    use crate::value::{Mapping, Value};

    #[derive(Object, Default, Debug, PartialEq)]
    #[objson(default)]
    struct Stage {
        name: String,
        seats: u32,
    }

    #[derive(Object, Default, Debug)]
    #[objson(default)]
    struct Tour {
        title: String,
        #[objson(hint = Stage)]
        stages: Vec<Stage>,
        #[objson(hint = Stage)]
        finale: Option<Stage>,
        #[objson(hint = Stage)]
        mixed: Vec<Dynamic>,
        extra: Value,
    }

    #[derive(Object)]
    struct NoConstructor {
        name: String,
    }

    #[derive(Object, Default)]
    #[objson(default)]
    struct Strict {
        stage: Option<Stage>,
    }

    #[derive(Object, Default)]
    #[objson(default)]
    struct Chain {
        #[objson(hint = Chain)]
        next: Option<Box<Chain>>,
        depth: u32,
    }

    fn parse(text: &str) -> Value {
        serde_json::from_str(text).unwrap()
    }

    #[test]
    fn declared_attributes_are_rebuilt() {
        let structure = parse(
            r#"{
                "title": "Aqours 1st",
                "stages": [{"name": "Yokohama", "seats": 17000}, {"name": "Osaka", "seats": 9000}],
                "finale": {"name": "Tokyo", "seats": 50000},
                "mixed": ["raw", {"name": "Numazu", "seats": 1}, [{"name": "inner", "seats": 0}]],
                "extra": {"kept": [1, 2]}
            }"#,
        );

        let tour = hydrate_as::<Tour>(structure).unwrap().unwrap();

        assert_eq!(tour.title, "Aqours 1st");
        assert_eq!(tour.stages.len(), 2);
        assert_eq!(tour.stages[1], Stage { name: "Osaka".into(), seats: 9000 });
        assert_eq!(tour.finale.as_ref().unwrap().seats, 50000);
        assert_eq!(tour.extra["kept"][1], 2);

        assert_eq!(tour.mixed.len(), 3);
        assert_eq!(tour.mixed[0].as_raw().unwrap(), "raw");
        assert_eq!(tour.mixed[1].downcast_ref::<Stage>().unwrap().name, "Numazu");
        // One level only: a list inside a hinted list stays raw.
        assert_eq!(tour.mixed[2].as_raw().unwrap()[0]["name"], "inner");
    }

    #[test]
    fn absent_keys_keep_constructor_defaults() {
        let tour = hydrate_as::<Tour>(parse(r#"{"finale": null}"#)).unwrap().unwrap();
        assert!(tour.stages.is_empty());
        assert!(tour.finale.is_none());
        assert!(tour.extra.is_null());
    }

    #[test]
    fn undeclared_nesting_is_not_rebuilt() {
        let err = hydrate_as::<Strict>(parse(r#"{"stage": {"name": "x", "seats": 1}}"#))
            .err()
            .unwrap();

        match &err {
            HydrateError::InAttribute { name, .. } => assert_eq!(name, "stage"),
            other => panic!("unexpected error: {other}"),
        }
        assert!(matches!(err.root_cause(), HydrateError::IncompatibleType { .. }));
    }

    #[test]
    fn deep_declared_chain() {
        let structure = parse(r#"{"depth": 0, "next": {"depth": 1, "next": {"depth": 2}}}"#);
        let chain = hydrate_as::<Chain>(structure).unwrap().unwrap();

        let second = chain.next.as_ref().unwrap();
        let third = second.next.as_ref().unwrap();
        assert_eq!((chain.depth, second.depth, third.depth), (0, 1, 2));
        assert!(third.next.is_none());
    }

    #[test]
    fn null_and_wrong_shapes() {
        assert!(hydrate(Value::Null, &Tour::class_meta()).unwrap().is_none());

        let err = hydrate(Value::from(3), &Tour::class_meta()).err().unwrap();
        assert!(matches!(err, HydrateError::IncompatibleType { .. }));

        // A hinted class given a primitive.
        let err = hydrate_as::<Tour>(parse(r#"{"finale": 5}"#)).err().unwrap();
        assert!(matches!(err.root_cause(), HydrateError::IncompatibleType { .. }));
    }

    #[test]
    fn construction_and_resolution_failures() {
        let err = hydrate_as::<NoConstructor>(parse(r#"{"name": "x"}"#)).err().unwrap();
        assert!(matches!(err, HydrateError::MissingConstructionPath { .. }));

        let err = hydrate_as::<Stage>(parse(r#"{"name": "x", "capacity": 3}"#))
            .err()
            .unwrap();
        match err {
            HydrateError::UnresolvableAttribute { name, .. } => assert_eq!(name, "capacity"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn empty_mapping_yields_defaults() {
        let stage = hydrate_as::<Stage>(Value::Map(Mapping::new())).unwrap().unwrap();
        assert_eq!(stage, Stage::default());
    }
}
