use syn::meta::ParseNestedMeta;
use syn::{Ident, LitStr, Type};

/// A computed attribute declared with `#[objson(property(...))]`.
///
/// ```ignore
/// #[objson(property(name = "display", get = display_name, set = set_display_name, hint = Name))]
/// ```
#[derive(Debug)]
pub(crate) struct PropertyAttribute {
    pub name: String,
    pub getter: Ident,
    pub setter: Option<Ident>,
    pub hint: Option<Type>,
}

impl PropertyAttribute {
    pub fn parse(meta: &ParseNestedMeta) -> syn::Result<Self> {
        let mut name = None;
        let mut getter = None;
        let mut setter = None;
        let mut hint = None;

        meta.parse_nested_meta(|inner| {
            if inner.path.is_ident("name") {
                let lit: LitStr = inner.value()?.parse()?;
                name = Some(lit.value());
            } else if inner.path.is_ident("get") {
                getter = Some(inner.value()?.parse::<Ident>()?);
            } else if inner.path.is_ident("set") {
                setter = Some(inner.value()?.parse::<Ident>()?);
            } else if inner.path.is_ident("hint") {
                hint = Some(inner.value()?.parse::<Type>()?);
            } else {
                return Err(inner.error("expected `name`, `get`, `set` or `hint`"));
            }
            Ok(())
        })?;

        let Some(getter) = getter else {
            return Err(meta.error("a property needs a getter: `get = method`"));
        };
        let name = name.unwrap_or_else(|| crate::utils::attribute_name(&getter));

        Ok(Self {
            name,
            getter,
            setter,
            hint,
        })
    }
}
