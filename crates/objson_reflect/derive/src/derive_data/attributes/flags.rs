use syn::Path;

/// A struct used to control whether a trait needs to be implemented.
#[derive(Debug)]
pub(crate) struct TraitImplSwitches {
    /// Default is `true`, use `#[objson(Object = false)]` to disable it.
    pub(crate) impl_object: bool,
    /// Default is `true`, use `#[objson(GetClassMeta = false)]` to disable it.
    /// Then users must provide the class metadata themselves.
    pub(crate) impl_get_class_meta: bool,
    /// Default is `true`, use `#[objson(Flatten = false)]` to disable it.
    pub(crate) impl_flatten: bool,
    /// Default is `true`, use `#[objson(FromDynamic = false)]` to disable it.
    pub(crate) impl_from_dynamic: bool,
}

impl Default for TraitImplSwitches {
    #[inline]
    fn default() -> Self {
        Self {
            impl_object: true,
            impl_get_class_meta: true,
            impl_flatten: true,
            impl_from_dynamic: true,
        }
    }
}

impl TraitImplSwitches {
    /// The switch named by `path`, if it names one.
    pub(crate) fn get_mut(&mut self, path: &Path) -> Option<&mut bool> {
        let ident = path.get_ident()?;
        if ident == "Object" {
            Some(&mut self.impl_object)
        } else if ident == "GetClassMeta" {
            Some(&mut self.impl_get_class_meta)
        } else if ident == "Flatten" {
            Some(&mut self.impl_flatten)
        } else if ident == "FromDynamic" {
            Some(&mut self.impl_from_dynamic)
        } else {
            None
        }
    }
}
