use alloc::boxed::Box;
use core::any::{TypeId, type_name};
use core::fmt;

use crate::hydrate::HydrateError;
use crate::reflect::Object;
use crate::registry::TypeHints;
use crate::value::Mapping;

/// Builds an instance through its zero-argument constructor.
pub type ConstructorFn = fn() -> Box<dyn Object>;

/// Builds an instance from a structure, removing every key it consumes.
///
/// The remaining keys are assigned one by one afterwards.
pub type FactoryFn = fn(&mut Mapping) -> Result<Box<dyn Object>, HydrateError>;

// -----------------------------------------------------------------------------
// ClassMeta

/// Runtime description of a class, used to hydrate it from a structure.
///
/// Holds the type identity, the optional construction paths and the
/// function producing the class's [`TypeHints`]. It is a small `Copy`
/// value built on demand; nothing is registered globally.
///
/// A factory hook, when present, takes precedence over the constructor.
///
/// # Example
///
/// ```
/// use objson_reflect::{Object, registry::GetClassMeta};
///
/// #[derive(Object, Default)]
/// #[objson(default)]
/// struct Member {
///     name: String,
/// }
///
/// let meta = Member::class_meta();
/// assert_eq!(meta.type_name(), "Member");
/// assert!(meta.constructor().is_some());
/// assert!(meta.factory().is_none());
/// assert!(meta.type_hints().is_empty());
/// ```
#[derive(Clone, Copy)]
pub struct ClassMeta {
    type_id: TypeId,
    type_path: &'static str,
    type_name: &'static str,
    constructor: Option<ConstructorFn>,
    factory: Option<FactoryFn>,
    type_hints: fn() -> TypeHints,
}

impl ClassMeta {
    /// Creates a [`ClassMeta`] with no construction path and no type hints.
    pub fn of<T: Object>() -> Self {
        let type_path = type_name::<T>();
        Self {
            type_id: TypeId::of::<T>(),
            type_path,
            type_name: short_name(type_path),
            constructor: None,
            factory: None,
            type_hints: TypeHints::new,
        }
    }

    #[inline]
    pub const fn with_constructor(mut self, constructor: ConstructorFn) -> Self {
        self.constructor = Some(constructor);
        self
    }

    #[inline]
    pub const fn with_factory(mut self, factory: FactoryFn) -> Self {
        self.factory = Some(factory);
        self
    }

    #[inline]
    pub const fn with_type_hints(mut self, type_hints: fn() -> TypeHints) -> Self {
        self.type_hints = type_hints;
        self
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// The full path, e.g. `my_crate::model::Member`.
    #[inline]
    pub const fn type_path(&self) -> &'static str {
        self.type_path
    }

    /// The last path segment without generic arguments, e.g. `Member`.
    #[inline]
    pub const fn type_name(&self) -> &'static str {
        self.type_name
    }

    #[inline]
    pub const fn constructor(&self) -> Option<ConstructorFn> {
        self.constructor
    }

    #[inline]
    pub const fn factory(&self) -> Option<FactoryFn> {
        self.factory
    }

    /// Builds the class's type hints.
    #[inline]
    pub fn type_hints(&self) -> TypeHints {
        (self.type_hints)()
    }

    #[inline]
    pub fn is<T: Object>(&self) -> bool {
        self.type_id == TypeId::of::<T>()
    }
}

fn short_name(type_path: &'static str) -> &'static str {
    let base = match type_path.find('<') {
        Some(index) => &type_path[..index],
        None => type_path,
    };
    match base.rfind("::") {
        Some(index) => &base[index + 2..],
        None => base,
    }
}

impl PartialEq for ClassMeta {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for ClassMeta {}

impl fmt::Debug for ClassMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassMeta")
            .field("type_path", &self.type_path)
            .field("constructor", &self.constructor.is_some())
            .field("factory", &self.factory.is_some())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetClassMeta

/// A trait which allows a type to provide its [`ClassMeta`].
///
/// Implemented by `#[derive(Object)]`. Write it by hand after
/// `#[objson(GetClassMeta = false)]` when the hints or construction
/// paths need code the attributes cannot express.
///
/// ```
/// use objson_reflect::Object;
/// use objson_reflect::registry::{ClassMeta, GetClassMeta, TypeHints};
///
/// #[derive(Object, Default)]
/// #[objson(default)]
/// struct Stage {
///     name: String,
/// }
///
/// #[derive(Object, Default)]
/// #[objson(GetClassMeta = false)]
/// struct Tour {
///     stages: Vec<Stage>,
/// }
///
/// impl GetClassMeta for Tour {
///     fn class_meta() -> ClassMeta {
///         ClassMeta::of::<Self>()
///             .with_constructor(|| Box::new(Tour::default()))
///             .with_type_hints(|| TypeHints::new().with("stages", Stage::class_meta()))
///     }
/// }
///
/// assert!(Tour::class_meta().type_hints().contains("stages"));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `GetClassMeta`",
    note = "consider annotating `{Self}` with `#[derive(Object)]`"
)]
pub trait GetClassMeta: Object + Sized {
    fn class_meta() -> ClassMeta;
}
