use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::ObjectStruct;

/// Generate implementation code for `FromDynamic` trait.
///
/// Only hydrated objects convert; a raw mapping means the attribute had no
/// type hint, which the conversion reports as an incompatible type.
pub(crate) fn impl_trait_from_dynamic(info: &ObjectStruct) -> TokenStream {
    let objson_reflect_path = info.objson_reflect_path();
    let from_dynamic_ = crate::path::from_dynamic_(objson_reflect_path);
    let downcast_object_ = crate::path::downcast_object_(objson_reflect_path);
    let dynamic_ = crate::path::dynamic_(objson_reflect_path);
    let hydrate_error_ = crate::path::hydrate_error_(objson_reflect_path);

    let ident = info.ident;
    let (impl_generics, ty_generics, _) = info.generics.split_for_impl();
    let where_clause = info.where_clause();

    quote! {
        impl #impl_generics #from_dynamic_ for #ident #ty_generics #where_clause {
            #[inline]
            fn from_dynamic(value: #dynamic_) -> ::core::result::Result<Self, #hydrate_error_> {
                #downcast_object_::<Self>(value)
            }
        }
    }
}
