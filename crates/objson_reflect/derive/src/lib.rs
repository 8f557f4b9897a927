//! See the [`Object`] derive macro.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static OBJSON_ATTRIBUTE_NAME: &str = "objson";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Object Derivation
///
/// `#[derive(Object)]` makes a struct with named fields flattenable and
/// hydratable. It implements the following traits:
///
/// - `Object`: attribute reflection and assignment.
/// - `GetClassMeta`: the class metadata (constructor, factory hook, type hints).
/// - `Flatten`: so the struct can be nested inside other values.
/// - `FromDynamic`: so the struct can be the type of another class's field.
///
/// Enums, unions and tuple structs are rejected. Unit structs are accepted
/// and flatten to an empty mapping.
///
/// ## Attributes
///
/// Every field whose name does not start with `_` is an attribute, flattened
/// under its own name (raw identifiers lose their `r#`). Field types must
/// implement `Flatten` and `FromDynamic`.
///
/// ```rust, ignore
/// #[derive(Object, Default)]
/// #[objson(default)]
/// struct Member {
///     name: String,
///     r#type: String,   // attribute `type`
///     _cache: Vec<u8>,  // private, never flattened or assigned
///     #[objson(skip)]
///     scratch: u32,     // same as private
/// }
/// ```
///
/// ## Construction
///
/// Hydration needs a way to build an instance before attributes are assigned.
///
/// - `#[objson(default)]` uses `Default::default()` as the constructor.
/// - `#[objson(factory = path)]` names a function
///   `fn(&mut Mapping) -> Result<Self, HydrateError>`. It receives the whole
///   mapping, removes the keys it consumes, and the remaining keys are
///   assigned afterwards. The factory hook wins over `default`.
///
/// Without either, hydration of the class fails with `MissingConstructionPath`.
///
/// ```rust, ignore
/// #[derive(Object)]
/// #[objson(factory = Unit::create)]
/// struct Unit {
///     name: String,
///     members: Vec<String>,
/// }
///
/// impl Unit {
///     fn create(mapping: &mut Mapping) -> Result<Self, HydrateError> {
///         Ok(Self { name: mapping.take("name")?, members: Vec::new() })
///     }
/// }
/// ```
///
/// ## Type hints
///
/// Nested classes are only rebuilt where a hint declares them. The hint
/// applies to a mapping value and to every mapping element of a list value.
///
/// ```rust, ignore
/// #[derive(Object, Default)]
/// #[objson(default)]
/// struct Group {
///     #[objson(hint = Member)]
///     members: Vec<Member>,
///     #[objson(hint = Member)]
///     leader: Option<Member>,
/// }
/// ```
///
/// ## Properties
///
/// Computed attributes are declared on the type. `get` names a `&self`
/// method whose return type implements `Flatten`; `set` optionally names a
/// `&mut self` method taking one `FromDynamic` argument. The attribute name
/// defaults to the getter name, and `hint` works as it does on fields.
///
/// ```rust, ignore
/// #[derive(Object, Default)]
/// #[objson(default, property(get = nickname, set = set_nickname))]
/// #[objson(property(name = "display", get = display_name))]
/// struct Member {
///     _nickname: Option<String>,
/// }
/// ```
///
/// A property shadows a field of the same name.
///
/// ## Disabling implementations
///
/// Each generated trait can be turned off and written by hand:
///
/// ```rust, ignore
/// #[derive(Object)]
/// #[objson(GetClassMeta = false)]
/// struct Manual { /* ... */ }
/// ```
///
/// The switches are `Object`, `GetClassMeta`, `Flatten` and `FromDynamic`.
#[proc_macro_derive(Object, attributes(objson))]
pub fn derive_object(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    match derive_data::ObjectStruct::from_input(&ast) {
        Ok(info) => impls::impl_object_traits(&info).into(),
        Err(err) => err.into_compile_error().into(),
    }
}
