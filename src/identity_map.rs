//! Map keyed by reference identity rather than value equality.

use std::rc::Rc;

use crate::pool::discard_key;
use crate::raw::{KeySpec, RawCursor, RawIter, RawPoolTable, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR};

struct PtrKey<K>(Rc<K>);

impl<K> KeySpec<Rc<K>> for PtrKey<K> {
    fn matches(&self, stored: &Rc<K>) -> bool {
        Rc::ptr_eq(&self.0, stored)
    }

    fn into_stored(self, _recycled: Option<Rc<K>>) -> Rc<K> {
        self.0
    }
}

fn ptr_hash<K>(key: &Rc<K>) -> u64 {
    Rc::as_ptr(key) as usize as u64
}

/// A chained hash map whose keys are `Rc` handles compared by pointer
/// identity: two distinct `Rc`s with equal contents are distinct keys,
/// and the referent's address is the hash. No `Hash`/`Eq` bound is
/// required of `K` and no user code runs during lookups.
///
/// Entries hold a strong count on their key, so a key cannot be freed
/// (and its address recycled) while it is mapped.
pub struct IdentityMap<K, V> {
    table: RawPoolTable<Rc<K>, V>,
}

impl<K, V> IdentityMap<K, V> {
    /// Creates a map with the default capacity (128) and load factor
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
            table: RawPoolTable::new(capacity, load_factor, discard_key),
        }
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Current bucket count.
    pub fn capacity(&self) -> usize {
        self.table.capacity()
    }

    pub fn contains_key(&self, key: &Rc<K>) -> bool {
        self.table
            .contains(ptr_hash(key), |stored| Rc::ptr_eq(stored, key))
    }

    pub fn get(&self, key: &Rc<K>) -> Option<&V> {
        self.table
            .get(ptr_hash(key), |stored| Rc::ptr_eq(stored, key))
    }

    pub fn get_mut(&mut self, key: &Rc<K>) -> Option<&mut V> {
        self.table
            .get_mut(ptr_hash(key), |stored| Rc::ptr_eq(stored, key))
    }

    /// Maps this exact `Rc` to `value`, returning the previous value if
    /// this identity was already mapped.
    pub fn put(&mut self, key: Rc<K>, value: V) -> Option<V> {
        let hash = ptr_hash(&key);
        self.table.insert(hash, PtrKey(key), value)
    }

    pub fn remove(&mut self, key: &Rc<K>) -> Option<V> {
        self.table
            .remove(ptr_hash(key), |stored| Rc::ptr_eq(stored, key))
    }

    /// Removes every mapping. Capacity is retained.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn retired_count(&self) -> usize {
        self.table.retired_count()
    }

    pub fn clear_retired_arrays(&mut self) {
        self.table.clear_retired_arrays();
    }

    /// Read-only iteration over `(&Rc<K>, &V)` pairs.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Starts a removal-capable pass over the map.
    pub fn cursor(&mut self) -> Cursor<'_, K, V> {
        Cursor {
            inner: self.table.cursor(),
        }
    }
}

impl<K, V> Default for IdentityMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over `(&Rc<K>, &V)` pairs of an [`IdentityMap`].
pub struct Iter<'a, K, V> {
    inner: RawIter<'a, Rc<K>, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a Rc<K>, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Removal-capable traversal over an [`IdentityMap`].
pub struct Cursor<'a, K, V> {
    inner: RawCursor<'a, Rc<K>, V>,
}

impl<K, V> Cursor<'_, K, V> {
    pub fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    /// Advances and returns the next value, or `None` once exhausted.
    pub fn next(&mut self) -> Option<&V> {
        self.inner.next()?;
        self.inner.value()
    }

    /// Key of the entry `next` last returned.
    pub fn key(&self) -> Option<&Rc<K>> {
        self.inner.key()
    }

    pub fn value(&self) -> Option<&V> {
        self.inner.value()
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.inner.value_mut()
    }

    /// Removes the entry `next` last returned; `None` on protocol
    /// misuse.
    pub fn remove(&mut self) -> Option<V> {
        self.inner.remove()
    }
}
