use proc_macro2::Span;
use syn::meta::ParseNestedMeta;
use syn::spanned::Spanned;
use syn::{Attribute, LitBool, Path};

use super::{PropertyAttribute, TraitImplSwitches};
use crate::OBJSON_ATTRIBUTE_NAME;

/// Type-level `#[objson(...)]` attributes.
#[derive(Default, Debug)]
pub(crate) struct TypeAttributes {
    /// `#[objson(default)]`: `Default::default` is the constructor.
    pub default: Option<Span>,
    /// `#[objson(factory = path)]`
    pub factory: Option<Path>,
    pub properties: Vec<PropertyAttribute>,
    pub impl_switches: TraitImplSwitches,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut this = Self::default();
        for attr in attrs {
            if attr.path().is_ident(OBJSON_ATTRIBUTE_NAME) {
                attr.parse_nested_meta(|meta| this.parse_meta(meta))?;
            }
        }
        this.check_properties()?;
        Ok(this)
    }

    fn parse_meta(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("default") {
            if self.default.is_some() {
                return Err(meta.error("duplicate `default`"));
            }
            self.default = Some(meta.path.span());
        } else if meta.path.is_ident("factory") {
            if self.factory.is_some() {
                return Err(meta.error("duplicate `factory`"));
            }
            self.factory = Some(meta.value()?.parse()?);
        } else if meta.path.is_ident("property") {
            self.properties.push(PropertyAttribute::parse(&meta)?);
        } else if meta.path.is_ident("skip") || meta.path.is_ident("hint") {
            return Err(meta.error("`skip` and `hint` belong on fields"));
        } else if let Some(switch) = self.impl_switches.get_mut(&meta.path) {
            let lit: LitBool = meta.value()?.parse()?;
            *switch = lit.value;
        } else {
            return Err(meta.error(
                "expected `default`, `factory`, `property` or a trait switch such as `GetClassMeta = false`",
            ));
        }
        Ok(())
    }

    fn check_properties(&self) -> syn::Result<()> {
        for (index, property) in self.properties.iter().enumerate() {
            if self.properties[..index].iter().any(|p| p.name == property.name) {
                return Err(syn::Error::new(
                    property.getter.span(),
                    format!("duplicate property `{}`", property.name),
                ));
            }
        }
        Ok(())
    }
}
