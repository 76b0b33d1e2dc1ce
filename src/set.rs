//! Sets layered on the map variants: each stores `()` as a sentinel
//! value and exposes element-oriented operations.

use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};
use std::rc::Rc;

use crate::identity_map::IdentityMap;
use crate::map::Map;
use crate::raw::{DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR};
use crate::scalar_map::{ScalarKey, ScalarMap};
use std::borrow::Borrow;

/// Set keyed by `i32`.
pub type IntSet = ScalarSet<i32>;

/// Set keyed by `i64`.
pub type LongSet = ScalarSet<i64>;

/// A hash set over [`Map`]: unique `Eq + Hash` elements with pooled
/// storage and a removal-capable cursor.
pub struct Set<K, S = RandomState> {
    map: Map<K, (), S>,
}

impl<K> Set<K>
where
    K: Eq + Hash,
{
    /// Creates a set with the default capacity (128) and load factor
    /// (0.80).
    pub fn new() -> Self {
        Self::with_capacity_and_load_factor(DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR)
    }

    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_load_factor(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// # Panics
    ///
    /// Panics if `capacity` is zero or `load_factor` is not a positive
    /// finite number.
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f32) -> Self {
        Self {
            map: Map::with_capacity_and_load_factor(capacity, load_factor),
        }
    }
}

impl<K> Default for Set<K>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, S> Set<K, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    pub fn with_hasher(hasher: S) -> Self {
        Self {
            map: Map::with_hasher(hasher),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Adds `value`, returning whether it was newly added.
    pub fn add(&mut self, value: K) -> bool {
        self.map.put(value, ()).is_none()
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.contains_key(value)
    }

    /// Removes `value`, returning whether it was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.map.remove(value).is_some()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &K> {
        self.map.iter().map(|(k, _)| k)
    }

    /// Starts a removal-capable pass over the set's elements.
    pub fn cursor(&mut self) -> Cursor<'_, K> {
        Cursor {
            inner: self.map.cursor(),
        }
    }
}

/// Removal-capable traversal over a [`Set`].
pub struct Cursor<'a, K> {
    inner: crate::map::Cursor<'a, K, ()>,
}

impl<K> Cursor<'_, K> {
    pub fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    /// Advances and returns the next element, or `None` once exhausted.
    pub fn next(&mut self) -> Option<&K> {
        self.inner.next()?;
        self.inner.key()
    }

    /// Removes the element `next` last returned, returning whether an
    /// element was removed.
    pub fn remove(&mut self) -> bool {
        self.inner.remove().is_some()
    }
}

/// A set of primitive integers over [`ScalarMap`].
pub struct ScalarSet<K> {
    map: ScalarMap<K, ()>,
}

impl<K> ScalarSet<K>
where
    K: ScalarKey,
{
    /// Creates a set with the default capacity (128) and load factor
    /// (0.80).
    pub fn new() -> Self {
        Self::with_capacity_and_load_factor(DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR)
    }

    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_load_factor(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// # Panics
    ///
    /// Panics if `capacity` is zero or `load_factor` is not a positive
    /// finite number.
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f32) -> Self {
        Self {
            map: ScalarMap::with_capacity_and_load_factor(capacity, load_factor),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Adds `value`, returning whether it was newly added.
    pub fn add(&mut self, value: K) -> bool {
        self.map.put(value, ()).is_none()
    }

    pub fn contains(&self, value: K) -> bool {
        self.map.contains_key(value)
    }

    /// Removes `value`, returning whether it was present.
    pub fn remove(&mut self, value: K) -> bool {
        self.map.remove(value).is_some()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = K> + '_ {
        self.map.iter().map(|(k, _)| k)
    }

    /// Starts a removal-capable pass over the set's elements.
    pub fn cursor(&mut self) -> ScalarCursor<'_, K> {
        ScalarCursor {
            inner: self.map.cursor(),
        }
    }
}

impl<K> Default for ScalarSet<K>
where
    K: ScalarKey,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Removal-capable traversal over a [`ScalarSet`].
pub struct ScalarCursor<'a, K> {
    inner: crate::scalar_map::Cursor<'a, K, ()>,
}

impl<K: ScalarKey> ScalarCursor<'_, K> {
    pub fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    /// Advances and returns the next element, or `None` once exhausted.
    pub fn next(&mut self) -> Option<K> {
        self.inner.next()?;
        self.inner.key()
    }

    /// Removes the element `next` last returned, returning whether an
    /// element was removed.
    pub fn remove(&mut self) -> bool {
        self.inner.remove().is_some()
    }
}

/// A set of `Rc` handles compared by pointer identity, over
/// [`IdentityMap`].
pub struct IdentitySet<K> {
    map: IdentityMap<K, ()>,
}

impl<K> IdentitySet<K> {
    /// Creates a set with the default capacity (128) and load factor
    /// (0.80).
    pub fn new() -> Self {
        Self::with_capacity_and_load_factor(DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR)
    }

    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_load_factor(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// # Panics
    ///
    /// Panics if `capacity` is zero or `load_factor` is not a positive
    /// finite number.
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f32) -> Self {
        Self {
            map: IdentityMap::with_capacity_and_load_factor(capacity, load_factor),
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Adds this exact `Rc`, returning whether it was newly added.
    pub fn add(&mut self, value: Rc<K>) -> bool {
        self.map.put(value, ()).is_none()
    }

    pub fn contains(&self, value: &Rc<K>) -> bool {
        self.map.contains_key(value)
    }

    /// Removes this exact `Rc`, returning whether it was present.
    pub fn remove(&mut self, value: &Rc<K>) -> bool {
        self.map.remove(value).is_some()
    }

    pub fn clear(&mut self) {
        self.map.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Rc<K>> {
        self.map.iter().map(|(k, _)| k)
    }
}

impl<K> Default for IdentitySet<K> {
    fn default() -> Self {
        Self::new()
    }
}
