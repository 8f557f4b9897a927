use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;
use core::hash::BuildHasher;
use core::iter::FusedIterator;
use core::ops::Index;
use core::slice;

use objson_utils::hash::FixedHashState;
use objson_utils::hash::hashbrown::HashTable;

use crate::hydrate::{FromDynamic, HydrateError};
use crate::reflect::Dynamic;
use crate::value::Value;

// -----------------------------------------------------------------------------
// Mapping

/// A string-keyed map that remembers insertion order.
///
/// Entries are written out in the order they were inserted, which keeps
/// flattened objects in field declaration order. Equality ignores order,
/// two mappings are equal when they hold the same key/value pairs.
///
/// Replacing the value of an existing key keeps its position;
/// [`Mapping::remove`] shifts later entries forward.
///
/// # Examples
///
/// ```
/// use objson_reflect::value::{Mapping, Value};
///
/// let mut a = Mapping::new();
/// a.insert("name", Value::from("Hoshino"));
/// a.insert("age", Value::from(16));
///
/// let b: Mapping = [("age", Value::from(16)), ("name", Value::from("Hoshino"))]
///     .into_iter()
///     .collect();
///
/// assert_eq!(a, b);
/// assert_eq!(a.keys().collect::<Vec<_>>(), ["name", "age"]);
/// ```
#[derive(Clone)]
pub struct Mapping<V = Value> {
    entries: Vec<(String, V)>,
    // Positions into `entries`, hashed by key.
    indices: HashTable<usize>,
}

#[inline]
fn hash_key(key: &str) -> u64 {
    FixedHashState.hash_one(key)
}

impl<V> Mapping<V> {
    /// Creates an empty mapping.
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            indices: HashTable::new(),
        }
    }

    /// Creates an empty mapping with space for at least `capacity` entries.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
            indices: HashTable::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    fn position(&self, key: &str) -> Option<usize> {
        let entries = &self.entries;
        self.indices
            .find(hash_key(key), |&index| entries[index].0 == key)
            .copied()
    }

    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Returns a reference to the value stored under `key`.
    #[inline]
    pub fn get(&self, key: &str) -> Option<&V> {
        self.position(key).map(|index| &self.entries[index].1)
    }

    /// Returns a mutable reference to the value stored under `key`.
    #[inline]
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.position(key).map(|index| &mut self.entries[index].1)
    }

    /// Inserts a key/value pair.
    ///
    /// If the key was present, its value is replaced in place and the
    /// old value is returned.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key: String = key.into();
        if let Some(index) = self.position(&key) {
            return Some(core::mem::replace(&mut self.entries[index].1, value));
        }

        let Self { entries, indices } = self;
        let index = entries.len();
        indices.insert_unique(hash_key(&key), index, |&i| hash_key(&entries[i].0));
        entries.push((key, value));
        None
    }

    /// Removes `key` and returns its value, preserving the order of the
    /// remaining entries.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let entries = &self.entries;
        let (index, _) = self
            .indices
            .find_entry(hash_key(key), |&i| entries[i].0 == key)
            .ok()?
            .remove();

        for slot in self.indices.iter_mut() {
            if *slot > index {
                *slot -= 1;
            }
        }
        Some(self.entries.remove(index).1)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.indices.clear();
    }

    #[inline]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.entries.iter(),
        }
    }

    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, V> {
        IterMut {
            inner: self.entries.iter_mut(),
        }
    }

    #[inline]
    pub fn keys(&self) -> impl DoubleEndedIterator<Item = &str> + ExactSizeIterator {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    #[inline]
    pub fn values(&self) -> impl DoubleEndedIterator<Item = &V> + ExactSizeIterator {
        self.entries.iter().map(|(_, value)| value)
    }

    #[inline]
    pub fn values_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut V> + ExactSizeIterator {
        self.entries.iter_mut().map(|(_, value)| value)
    }

    #[inline]
    pub fn into_values(self) -> impl DoubleEndedIterator<Item = V> + ExactSizeIterator {
        self.entries.into_iter().map(|(_, value)| value)
    }
}

impl Mapping<Value> {
    /// Removes `key` and converts its value into `T`.
    ///
    /// A missing key converts from [`Value::Null`], so `Option<T>` targets
    /// read absent keys as `None`. This is the usual way for a factory
    /// hook to consume its constructor arguments.
    ///
    /// # Examples
    ///
    /// ```
    /// use objson_reflect::value::{Mapping, Value};
    ///
    /// let mut mapping: Mapping = [("name", Value::from("Ruby"))].into_iter().collect();
    ///
    /// let name: String = mapping.take("name").unwrap();
    /// let nickname: Option<String> = mapping.take("nickname").unwrap();
    ///
    /// assert_eq!(name, "Ruby");
    /// assert_eq!(nickname, None);
    /// assert!(mapping.is_empty());
    /// ```
    pub fn take<T: FromDynamic>(&mut self, key: &str) -> Result<T, HydrateError> {
        let value = self.remove(key).unwrap_or(Value::Null);
        T::from_dynamic(Dynamic::Raw(value))
    }
}

impl<V> Default for Mapping<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: PartialEq> PartialEq for Mapping<V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

impl<V: fmt::Debug> fmt::Debug for Mapping<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V> Index<&str> for Mapping<V> {
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present.
    #[inline]
    fn index(&self, key: &str) -> &V {
        match self.get(key) {
            Some(value) => value,
            None => panic!("key `{key}` is not present in the mapping"),
        }
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for Mapping<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut mapping = Self::with_capacity(iter.size_hint().0);
        mapping.extend(iter);
        mapping
    }
}

impl<K: Into<String>, V> Extend<(K, V)> for Mapping<V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

// -----------------------------------------------------------------------------
// Iterators

/// Borrowing iterator over the entries of a [`Mapping`], in insertion order.
pub struct Iter<'a, V> {
    inner: slice::Iter<'a, (String, V)>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key.as_str(), value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for Iter<'_, V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(key, value)| (key.as_str(), value))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}
impl<V> FusedIterator for Iter<'_, V> {}

/// Mutable iterator over the entries of a [`Mapping`]. Keys stay immutable.
pub struct IterMut<'a, V> {
    inner: slice::IterMut<'a, (String, V)>,
}

impl<'a, V> Iterator for IterMut<'a, V> {
    type Item = (&'a str, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, value)| (key.as_str(), value))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for IterMut<'_, V> {}
impl<V> FusedIterator for IterMut<'_, V> {}

/// Owning iterator over the entries of a [`Mapping`].
pub struct IntoIter<V> {
    inner: alloc::vec::IntoIter<(String, V)>,
}

impl<V> Iterator for IntoIter<V> {
    type Item = (String, V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> DoubleEndedIterator for IntoIter<V> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back()
    }
}

impl<V> ExactSizeIterator for IntoIter<V> {}
impl<V> FusedIterator for IntoIter<V> {}

impl<V> IntoIterator for Mapping<V> {
    type Item = (String, V);
    type IntoIter = IntoIter<V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter {
            inner: self.entries.into_iter(),
        }
    }
}

impl<'a, V> IntoIterator for &'a Mapping<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, V> IntoIterator for &'a mut Mapping<V> {
    type Item = (&'a str, &'a mut V);
    type IntoIter = IterMut<'a, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use super::Mapping;

    #[test]
    fn insert_keeps_order_and_replaces_in_place() {
        let mut m = Mapping::new();
        assert_eq!(m.insert("b", 1), None);
        assert_eq!(m.insert("a", 2), None);
        assert_eq!(m.insert("c", 3), None);
        assert_eq!(m.insert("a", 20), Some(2));

        let entries: Vec<_> = m.iter().map(|(k, v)| (k, *v)).collect();
        assert_eq!(entries, [("b", 1), ("a", 20), ("c", 3)]);
        assert_eq!(m["a"], 20);
    }

    #[test]
    fn remove_shifts_later_entries() {
        let mut m: Mapping<i32> = [("x", 1), ("y", 2), ("z", 3), ("w", 4)].into_iter().collect();

        assert_eq!(m.remove("y"), Some(2));
        assert_eq!(m.remove("y"), None);
        assert_eq!(m.len(), 3);

        // Indices of the shifted entries must still resolve.
        assert_eq!(m.get("z"), Some(&3));
        assert_eq!(m.get("w"), Some(&4));
        assert_eq!(m.keys().collect::<Vec<_>>(), ["x", "z", "w"]);

        m.insert("y", 5);
        assert_eq!(m.keys().collect::<Vec<_>>(), ["x", "z", "w", "y"]);
        assert_eq!(m.get("y"), Some(&5));
    }

    #[test]
    fn equality_ignores_order() {
        let a: Mapping<i32> = [("x", 1), ("y", 2)].into_iter().collect();
        let b: Mapping<i32> = [("y", 2), ("x", 1)].into_iter().collect();
        let c: Mapping<i32> = [("y", 2), ("x", 3)].into_iter().collect();
        let d: Mapping<i32> = [("x", 1)].into_iter().collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
        assert_ne!(d, a);
    }
}
