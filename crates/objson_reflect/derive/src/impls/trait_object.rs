use proc_macro2::TokenStream;
use quote::quote;

use crate::derive_data::{ObjectField, ObjectStruct, PropertyAttribute};

/// Generate implementation code for `Object` trait.
///
/// Stored attributes are the active fields in declaration order. Assignment
/// matches on the attribute name; a property with a setter takes the arm of
/// a field it shadows, one without a setter makes the name unresolvable.
pub(crate) fn impl_trait_object(info: &ObjectStruct) -> TokenStream {
    let objson_reflect_path = info.objson_reflect_path();
    let object_ = crate::path::object_(objson_reflect_path);
    let get_class_meta_ = crate::path::get_class_meta_(objson_reflect_path);
    let class_meta_ = crate::path::class_meta_(objson_reflect_path);
    let flatten_ = crate::path::flatten_(objson_reflect_path);
    let dynamic_ = crate::path::dynamic_(objson_reflect_path);
    let hydrate_error_ = crate::path::hydrate_error_(objson_reflect_path);
    let type_name_ = crate::path::type_name_(objson_reflect_path);
    let vec_ = crate::path::vec_(objson_reflect_path);

    let stored = info.active_fields().map(|field| {
        let name = &field.name;
        let member = field.member;
        quote! { (#name, &self.#member as &dyn #flatten_) }
    });

    let properties_fn = properties_fn(info);

    let field_arms = info
        .active_fields()
        .filter(|field| !info.is_shadowed(&field.name))
        .map(|field| field_arm(info, field));
    let property_arms = info
        .attrs
        .properties
        .iter()
        .filter(|property| property.setter.is_some())
        .map(|property| property_arm(info, property));
    let mut arms = field_arms.chain(property_arms).peekable();

    // A struct without assignable attributes never reads `value`.
    let allow_unused = match arms.peek() {
        Some(_) => crate::utils::empty(),
        None => quote! { #[allow(unused_variables)] },
    };

    let ident = info.ident;
    let (impl_generics, ty_generics, _) = info.generics.split_for_impl();
    let where_clause = info.where_clause();

    quote! {
        impl #impl_generics #object_ for #ident #ty_generics #where_clause {
            #[inline]
            fn reflect_class_meta(&self) -> #class_meta_ {
                <Self as #get_class_meta_>::class_meta()
            }

            fn stored_attributes(&self) -> #vec_<(&'static str, &dyn #flatten_)> {
                #vec_::from([#(#stored),*])
            }

            #properties_fn

            #allow_unused
            fn set_attribute(
                &mut self,
                name: &str,
                value: #dynamic_,
            ) -> ::core::result::Result<(), #hydrate_error_> {
                match name {
                    #(#arms)*
                    _ => ::core::result::Result::Err(#hydrate_error_::UnresolvableAttribute {
                        type_path: #type_name_::<Self>(),
                        name: ::core::convert::Into::into(name),
                    }),
                }
            }
        }
    }
}

fn properties_fn(info: &ObjectStruct) -> TokenStream {
    if info.attrs.properties.is_empty() {
        return crate::utils::empty();
    }

    let objson_reflect_path = info.objson_reflect_path();
    let flatten_ = crate::path::flatten_(objson_reflect_path);
    let box_ = crate::path::box_(objson_reflect_path);
    let vec_ = crate::path::vec_(objson_reflect_path);

    let computed = info.attrs.properties.iter().map(|property| {
        let name = &property.name;
        let getter = &property.getter;
        quote! { (#name, #box_::new(self.#getter()) as #box_<dyn #flatten_ + '_>) }
    });

    quote! {
        fn properties(&self) -> #vec_<(&'static str, #box_<dyn #flatten_ + '_>)> {
            #vec_::from([#(#computed),*])
        }
    }
}

fn converted_value(info: &ObjectStruct, name: &str) -> TokenStream {
    let objson_reflect_path = info.objson_reflect_path();
    let from_dynamic_ = crate::path::from_dynamic_(objson_reflect_path);
    let type_name_ = crate::path::type_name_(objson_reflect_path);

    quote! {
        #from_dynamic_::from_dynamic(value)
            .map_err(|error| error.in_attribute(#type_name_::<Self>(), #name))?
    }
}

fn field_arm(info: &ObjectStruct, field: &ObjectField) -> TokenStream {
    let name = &field.name;
    let member = field.member;
    let value = converted_value(info, name);
    quote! {
        #name => {
            self.#member = #value;
            ::core::result::Result::Ok(())
        }
    }
}

fn property_arm(info: &ObjectStruct, property: &PropertyAttribute) -> TokenStream {
    let name = &property.name;
    let setter = &property.setter;
    let value = converted_value(info, name);
    quote! {
        #name => {
            self.#setter(#value);
            ::core::result::Result::Ok(())
        }
    }
}
