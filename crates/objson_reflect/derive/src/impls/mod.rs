//! Code generation for `#[derive(Object)]`.

// -----------------------------------------------------------------------------
// Modules

mod trait_flatten;
mod trait_from_dynamic;
mod trait_get_class_meta;
mod trait_object;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ObjectStruct;

pub(crate) use trait_flatten::impl_trait_flatten;
pub(crate) use trait_from_dynamic::impl_trait_from_dynamic;
pub(crate) use trait_get_class_meta::impl_trait_get_class_meta;
pub(crate) use trait_object::impl_trait_object;

/// Generates every trait impl enabled by the switches.
pub(crate) fn impl_object_traits(info: &ObjectStruct) -> TokenStream {
    let switches = &info.attrs.impl_switches;

    let object_tokens = switches
        .impl_object
        .then(|| impl_trait_object(info));
    let get_class_meta_tokens = switches
        .impl_get_class_meta
        .then(|| impl_trait_get_class_meta(info));
    let flatten_tokens = switches.impl_flatten.then(|| impl_trait_flatten(info));
    let from_dynamic_tokens = switches
        .impl_from_dynamic
        .then(|| impl_trait_from_dynamic(info));

    quote! {
        const _: () = {
            #object_tokens

            #get_class_meta_tokens

            #flatten_tokens

            #from_dynamic_tokens
        };
    }
}
