use proc_macro2::TokenStream;
use quote::quote;
use syn::{Data, DeriveInput, Field, Fields, Generics, Ident, Path, Type};

use super::{FieldAttributes, TypeAttributes};

/// A named field of a derived struct.
pub(crate) struct ObjectField<'a> {
    pub member: &'a Ident,
    /// Attribute name, the field name without `r#`.
    pub name: String,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
}

impl<'a> ObjectField<'a> {
    fn from_field(field: &'a Field) -> syn::Result<Self> {
        let Some(member) = field.ident.as_ref() else {
            return Err(syn::Error::new_spanned(field, "expected a named field"));
        };
        Ok(Self {
            member,
            name: crate::utils::attribute_name(member),
            ty: &field.ty,
            attrs: FieldAttributes::parse_attrs(&field.attrs)?,
        })
    }

    /// Private and skipped fields take no part in reflection.
    #[inline]
    pub fn is_active(&self) -> bool {
        self.attrs.skip.is_none() && !self.name.starts_with('_')
    }
}

/// Everything the generators need to know about a derived struct.
pub(crate) struct ObjectStruct<'a> {
    pub ident: &'a Ident,
    pub generics: &'a Generics,
    pub attrs: TypeAttributes,
    pub fields: Vec<ObjectField<'a>>,
    objson_reflect_path: Path,
}

impl<'a> ObjectStruct<'a> {
    pub fn from_input(input: &'a DeriveInput) -> syn::Result<Self> {
        let fields = match &input.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => named
                    .named
                    .iter()
                    .map(ObjectField::from_field)
                    .collect::<syn::Result<Vec<_>>>()?,
                Fields::Unit => Vec::new(),
                Fields::Unnamed(_) => {
                    return Err(syn::Error::new_spanned(
                        &input.ident,
                        "`#[derive(Object)]` needs named fields, tuple structs have no attribute names",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "`#[derive(Object)]` does not support enums",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "`#[derive(Object)]` does not support unions",
                ));
            }
        };

        Ok(Self {
            ident: &input.ident,
            generics: &input.generics,
            attrs: TypeAttributes::parse_attrs(&input.attrs)?,
            fields,
            objson_reflect_path: crate::path::objson_reflect(),
        })
    }

    #[inline]
    pub fn objson_reflect_path(&self) -> &Path {
        &self.objson_reflect_path
    }

    /// Fields reflected as attributes, in declaration order.
    pub fn active_fields(&self) -> impl Iterator<Item = &ObjectField<'a>> {
        self.fields.iter().filter(|field| field.is_active())
    }

    /// Whether a property takes over the attribute `name`.
    pub fn is_shadowed(&self, name: &str) -> bool {
        self.attrs.properties.iter().any(|property| property.name == name)
    }

    /// The where clause shared by every generated impl.
    ///
    /// Generic structs additionally require `Self: Send + Sync + 'static`,
    /// `Flatten + FromDynamic` on each attribute field type and, with
    /// `#[objson(default)]`, `Self: Default`.
    pub fn where_clause(&self) -> TokenStream {
        let (_, _, where_clause) = self.generics.split_for_impl();
        if self.generics.type_params().next().is_none() {
            return quote! { #where_clause };
        }

        let path = self.objson_reflect_path();
        let flatten_ = crate::path::flatten_(path);
        let from_dynamic_ = crate::path::from_dynamic_(path);

        let field_types = self.active_fields().map(|field| field.ty);
        let default_bound = self
            .attrs
            .default
            .map(|_| quote! { Self: ::core::default::Default, });
        let predicates = where_clause.map(|clause| {
            let predicates = &clause.predicates;
            quote! { #predicates }
        });

        quote! {
            where
                Self: ::core::marker::Send + ::core::marker::Sync + 'static,
                #default_bound
                #(#field_types: #flatten_ + #from_dynamic_,)*
                #predicates
        }
    }
}
