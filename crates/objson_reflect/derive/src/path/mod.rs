//! Paths of the items generated code refers to.
//!
//! Everything goes through `objson_reflect::__macro_exports`, so the
//! generated code keeps working when the public layout moves.

use proc_macro2::TokenStream;
use quote::quote;
use syn::Path;

// -----------------------------------------------------------------------------
// Crate Path

/// Get the correct access path to the `objson_reflect` crate.
///
/// 1. For crates that depend on `objson_reflect`, `::objson_reflect` is returned.
/// 2. For crates that depend on `objson`, `::objson::reflect` is returned.
/// 3. Otherwise `::objson_reflect` is returned, which may be incorrect.
///
/// This reads the builder's `Cargo.toml`, so call it once per derive and
/// pass the path around.
pub(crate) fn objson_reflect() -> Path {
    objson_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("objson_reflect"))
}

// -----------------------------------------------------------------------------
// Exports

macro_rules! export_paths {
    ($($func:ident => $item:ident),* $(,)?) => {
        $(
            #[inline(always)]
            pub(crate) fn $func(objson_reflect_path: &Path) -> TokenStream {
                quote! { #objson_reflect_path::__macro_exports::$item }
            }
        )*
    };
}

export_paths! {
    box_ => Box,
    vec_ => Vec,
    type_name_ => type_name,
    flatten_ => Flatten,
    flatten_object_ => flatten_object,
    from_dynamic_ => FromDynamic,
    hydrate_error_ => HydrateError,
    downcast_object_ => downcast_object,
    dynamic_ => Dynamic,
    object_ => Object,
    class_meta_ => ClassMeta,
    get_class_meta_ => GetClassMeta,
    type_hints_ => TypeHints,
    value_ => Value,
}
