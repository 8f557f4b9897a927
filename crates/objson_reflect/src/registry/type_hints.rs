use core::fmt;

use objson_utils::hash::{FixedHashState, HashMap};

use crate::registry::ClassMeta;

/// Attribute name to the class its structures hydrate into.
///
/// Names without an entry keep their raw structure. A hint applies to a
/// mapping value directly and to every mapping element of a list value.
#[derive(Clone, Default)]
pub struct TypeHints {
    hints: HashMap<&'static str, ClassMeta>,
}

impl TypeHints {
    #[inline]
    pub const fn new() -> Self {
        Self {
            hints: HashMap::with_hasher(FixedHashState),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            hints: HashMap::with_capacity_and_hasher(capacity, FixedHashState),
        }
    }

    /// Declares that `name` holds structures of `class`.
    #[inline]
    pub fn insert(&mut self, name: &'static str, class: ClassMeta) -> Option<ClassMeta> {
        self.hints.insert(name, class)
    }

    /// Builder form of [`TypeHints::insert`].
    #[inline]
    pub fn with(mut self, name: &'static str, class: ClassMeta) -> Self {
        self.insert(name, class);
        self
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&ClassMeta> {
        self.hints.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.hints.contains_key(name)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.hints.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ClassMeta)> {
        self.hints.iter().map(|(name, class)| (*name, class))
    }
}

impl FromIterator<(&'static str, ClassMeta)> for TypeHints {
    fn from_iter<I: IntoIterator<Item = (&'static str, ClassMeta)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut hints = Self::with_capacity(iter.size_hint().0);
        for (name, class) in iter {
            hints.insert(name, class);
        }
        hints
    }
}

impl fmt::Debug for TypeHints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(name, class)| (name, class.type_path())))
            .finish()
    }
}
