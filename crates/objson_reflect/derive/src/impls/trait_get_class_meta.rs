use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::Type;

use crate::derive_data::ObjectStruct;

/// Generate implementation code for `GetClassMeta` trait.
///
/// The metadata is built with `ClassMeta::of::<Self>()` followed by the
/// optional `with_constructor`, `with_factory` and `with_type_hints` calls.
pub(crate) fn impl_trait_get_class_meta(info: &ObjectStruct) -> TokenStream {
    let objson_reflect_path = info.objson_reflect_path();
    let get_class_meta_ = crate::path::get_class_meta_(objson_reflect_path);
    let class_meta_ = crate::path::class_meta_(objson_reflect_path);
    let object_ = crate::path::object_(objson_reflect_path);
    let box_ = crate::path::box_(objson_reflect_path);

    let with_constructor = match info.attrs.default {
        Some(span) => quote_spanned! { span =>
            .with_constructor(|| #box_::new(<Self as ::core::default::Default>::default()) as #box_<dyn #object_>)
        },
        None => crate::utils::empty(),
    };

    let with_factory = match &info.attrs.factory {
        Some(factory) => quote! {
            .with_factory(|mapping| #factory(mapping).map(|object| #box_::new(object) as #box_<dyn #object_>))
        },
        None => crate::utils::empty(),
    };

    let with_type_hints = type_hints_expression(info);

    let ident = info.ident;
    let (impl_generics, ty_generics, _) = info.generics.split_for_impl();
    let where_clause = info.where_clause();

    quote! {
        impl #impl_generics #get_class_meta_ for #ident #ty_generics #where_clause {
            fn class_meta() -> #class_meta_ {
                #class_meta_::of::<Self>()
                    #with_constructor
                    #with_factory
                    #with_type_hints
            }
        }
    }
}

/// Collects the hints of fields and properties.
///
/// Returns an empty token stream when nothing is hinted, otherwise:
///
/// ```ignore
/// .with_type_hints(|| {
///     let mut hints = _path_::TypeHints::with_capacity(N);
///     hints.insert("name", <Type as _path_::GetClassMeta>::class_meta());
///     hints
/// })
/// ```
fn type_hints_expression(info: &ObjectStruct) -> TokenStream {
    let field_hints = info
        .active_fields()
        .filter(|field| !info.is_shadowed(&field.name))
        .filter_map(|field| Some((field.name.as_str(), field.attrs.hint.as_ref()?)));
    let property_hints = info
        .attrs
        .properties
        .iter()
        .filter_map(|property| Some((property.name.as_str(), property.hint.as_ref()?)));

    let hints: Vec<(&str, &Type)> = field_hints.chain(property_hints).collect();
    if hints.is_empty() {
        return crate::utils::empty();
    }

    let objson_reflect_path = info.objson_reflect_path();
    let type_hints_ = crate::path::type_hints_(objson_reflect_path);
    let get_class_meta_ = crate::path::get_class_meta_(objson_reflect_path);

    let capacity = hints.len();
    let inserts = hints.iter().map(|(name, ty)| {
        quote! {
            hints.insert(#name, <#ty as #get_class_meta_>::class_meta());
        }
    });

    quote! {
        .with_type_hints(|| {
            let mut hints = #type_hints_::with_capacity(#capacity);
            #(#inserts)*
            hints
        })
    }
}
