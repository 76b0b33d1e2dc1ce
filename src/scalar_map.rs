//! Maps keyed by raw integers. The key value itself is the hash (no
//! hasher runs), making these the cheapest variants for primitive keys.

use crate::pool::discard_key;
use crate::raw::{OwnedKey, RawCursor, RawIter, RawPoolTable, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR};

/// Integer key types usable with [`ScalarMap`].
pub trait ScalarKey: Copy + Eq {
    /// Zero-extends the key into the table's 64-bit hash domain.
    fn spread(self) -> u64;
}

impl ScalarKey for i32 {
    fn spread(self) -> u64 {
        self as u32 as u64
    }
}

impl ScalarKey for i64 {
    fn spread(self) -> u64 {
        self as u64
    }
}

impl ScalarKey for u32 {
    fn spread(self) -> u64 {
        self as u64
    }
}

impl ScalarKey for u64 {
    fn spread(self) -> u64 {
        self
    }
}

/// Map keyed by `i32`.
pub type IntMap<V> = ScalarMap<i32, V>;

/// Map keyed by `i64`.
pub type LongMap<V> = ScalarMap<i64, V>;

/// A chained hash map keyed by a primitive integer, with pooled entries
/// and a removal-capable cursor. The stored key doubles as the hash, so
/// keys that are `capacity` apart share a bucket until growth separates
/// them.
pub struct ScalarMap<K, V> {
    table: RawPoolTable<K, V>,
}

impl<K, V> ScalarMap<K, V>
where
    K: ScalarKey,
{
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

    pub fn contains_key(&self, key: K) -> bool {
        self.table.contains(key.spread(), |&stored| stored == key)
    }

    pub fn get(&self, key: K) -> Option<&V> {
        self.table.get(key.spread(), |&stored| stored == key)
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut V> {
        self.table.get_mut(key.spread(), |&stored| stored == key)
    }

    /// Maps `key` to `value`, returning the previous value on
    /// replacement.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        self.table.insert(key.spread(), OwnedKey(key), value)
    }

    pub fn remove(&mut self, key: K) -> Option<V> {
        self.table.remove(key.spread(), |&stored| stored == key)
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

    /// Read-only iteration over `(key, &value)` pairs.
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

impl<K, V> Default for ScalarMap<K, V>
where
    K: ScalarKey,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over `(K, &V)` pairs of a [`ScalarMap`].
pub struct Iter<'a, K, V> {
    inner: RawIter<'a, K, V>,
}

impl<'a, K: Copy, V> Iterator for Iter<'a, K, V> {
    type Item = (K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(&k, v)| (k, v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Copy, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Removal-capable traversal over a [`ScalarMap`].
pub struct Cursor<'a, K, V> {
    inner: RawCursor<'a, K, V>,
}

impl<K: Copy, V> Cursor<'_, K, V> {
    pub fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    /// Advances and returns the next value, or `None` once exhausted.
    pub fn next(&mut self) -> Option<&V> {
        self.inner.next()?;
        self.inner.value()
    }

    /// Key of the entry `next` last returned.
    pub fn key(&self) -> Option<K> {
        self.inner.key().copied()
    }

    pub fn value(&self) -> Option<&V> {
        self.inner.value()
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.inner.value_mut()
    }

    /// Removes the entry `next` last returned; `None` on protocol
    /// misuse (no preceding `next`, or already removed).
    pub fn remove(&mut self) -> Option<V> {
        self.inner.remove()
    }
}
