use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, Type};

use crate::OBJSON_ATTRIBUTE_NAME;

/// Field-level `#[objson(...)]` attributes.
#[derive(Default, Debug)]
pub(crate) struct FieldAttributes {
    /// `#[objson(skip)]`: treated like a private field.
    pub skip: Option<Span>,
    /// `#[objson(hint = Type)]`
    pub hint: Option<Type>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(OBJSON_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
            }
        }
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("skip") {
            self.skip = Some(meta.path.span());
        } else if meta.path.is_ident("hint") {
            if self.hint.is_some() {
                return Err(meta.error("duplicate `hint`"));
            }
            self.hint = Some(meta.value()?.parse()?);
        } else {
            return Err(meta.error("expected `skip` or `hint = Type`"));
        }
        Ok(())
    }
}
