use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ObjectStruct;

/// Generate implementation code for `Flatten` trait.
pub(crate) fn impl_trait_flatten(info: &ObjectStruct) -> TokenStream {
    let objson_reflect_path = info.objson_reflect_path();
    let flatten_ = crate::path::flatten_(objson_reflect_path);
    let flatten_object_ = crate::path::flatten_object_(objson_reflect_path);
    let value_ = crate::path::value_(objson_reflect_path);

    let ident = info.ident;
    let (impl_generics, ty_generics, _) = info.generics.split_for_impl();
    let where_clause = info.where_clause();

    quote! {
        impl #impl_generics #flatten_ for #ident #ty_generics #where_clause {
            #[inline]
            fn flatten(&self) -> #value_ {
                #flatten_object_(self)
            }
        }
    }
}
