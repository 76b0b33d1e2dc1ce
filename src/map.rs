//! Generic hash map over the pooled bucket-table engine.

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::hash::{BuildHasher, Hash};

use crate::pool::discard_key;
use crate::raw::{OwnedKey, RawCursor, RawIter, RawPoolTable, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR};

/// A chained hash map keyed by `Eq + Hash` values, with pooled entries
/// and a removal-capable cursor.
///
/// Steady-state operation is allocation-free: removed entries return to
/// an internal pool, growth reuses the pooled entries, and iteration
/// state lives on the stack. The map never shrinks.
///
/// Hashes are computed once per operation through the `BuildHasher` and
/// stored per entry; stored hashes are authoritative afterwards, so user
/// `Hash` code never runs during growth.
pub struct Map<K, V, S = RandomState> {
    table: RawPoolTable<K, V>,
    hasher: S,
}

impl<K, V> Map<K, V>
where
    K: Eq + Hash,
{
    /// Creates a map with the default capacity (128) and load factor
    /// (0.80).
    pub fn new() -> Self {
        Self::with_capacity_and_load_factor(DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR)
    }

    /// Creates a map with the given initial capacity and the default
    /// load factor. A power-of-two capacity lets slot selection use a
    /// bitwise mask instead of a modulo.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_load_factor(capacity, DEFAULT_LOAD_FACTOR)
    }

    /// Creates a map with the given initial capacity and load factor.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or `load_factor` is not a positive
    /// finite number.
    pub fn with_capacity_and_load_factor(capacity: usize, load_factor: f32) -> Self {
        Self::with_capacity_and_hasher(capacity, load_factor, RandomState::new())
    }
}

impl<K, V> Default for Map<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, S> Map<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Creates a map with the default capacity and load factor and the
    /// given hasher.
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR, hasher)
    }

    /// Fully parameterized constructor.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or `load_factor` is not a positive
    /// finite number.
    pub fn with_capacity_and_hasher(capacity: usize, load_factor: f32, hasher: S) -> Self {
        Self {
            table: RawPoolTable::new(capacity, load_factor, discard_key),
            hasher,
        }
    }

    fn hash_of<Q>(&self, key: &Q) -> u64
    where
        Q: ?Sized + Hash,
    {
        self.hasher.hash_one(key)
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

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table
            .contains(self.hash_of(key), |stored| stored.borrow() == key)
    }

    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table
            .get(self.hash_of(key), |stored| stored.borrow() == key)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table
            .get_mut(self.hash_of(key), |stored| stored.borrow() == key)
    }

    /// Maps `key` to `value`. Returns the previous value if the key was
    /// already present (replaced in place, no entry churn). Growth, when
    /// the load-factor threshold is crossed, happens before the new
    /// entry is linked.
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        let hash = self.hash_of(&key);
        self.table.insert(hash, OwnedKey(key), value)
    }

    /// Removes the mapping for `key`, returning its value. The freed
    /// entry goes back to the pool.
    pub fn remove<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.table
            .remove(self.hash_of(key), |stored| stored.borrow() == key)
    }

    /// Removes every mapping. Capacity is retained.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Number of superseded bucket arrays still parked after growth.
    pub fn retired_count(&self) -> usize {
        self.table.retired_count()
    }

    /// Drops the superseded bucket arrays kept after growth. Purely a
    /// memory-pressure hint.
    pub fn clear_retired_arrays(&mut self) {
        self.table.clear_retired_arrays();
    }

    /// Read-only iteration over `(key, value)` pairs, in no particular
    /// order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Starts a removal-capable pass over the map. The cursor borrows
    /// the map mutably, so passes cannot overlap and no other operation
    /// can interleave with one.
    pub fn cursor(&mut self) -> Cursor<'_, K, V> {
        Cursor {
            inner: self.table.cursor(),
        }
    }
}

/// Iterator over `(&K, &V)` pairs of a [`Map`].
pub struct Iter<'a, K, V> {
    inner: RawIter<'a, K, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

/// Removal-capable traversal over a [`Map`].
///
/// `next` yields values; the key of the entry last yielded is readable
/// through [`Cursor::key`] until the entry is removed or the pass moves
/// on.
pub struct Cursor<'a, K, V> {
    inner: RawCursor<'a, K, V>,
}

impl<K, V> Cursor<'_, K, V> {
    pub fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    /// Advances and returns the next value, or `None` once the pass has
    /// visited every entry present when the cursor was created.
    pub fn next(&mut self) -> Option<&V> {
        self.inner.next()?;
        self.inner.value()
    }

    /// Key of the entry `next` last returned.
    pub fn key(&self) -> Option<&K> {
        self.inner.key()
    }

    pub fn value(&self) -> Option<&V> {
        self.inner.value()
    }

    pub fn value_mut(&mut self) -> Option<&mut V> {
        self.inner.value_mut()
    }

    /// Removes the entry `next` last returned, exactly like
    /// [`Map::remove`]. Returns `None` if there is nothing to remove:
    /// `next` has not been called yet, or this entry was already
    /// removed.
    pub fn remove(&mut self) -> Option<V> {
        self.inner.remove()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Invariant: put returns the previous value on replacement and
    /// `None` on fresh keys; get always sees the last put.
    #[test]
    fn put_get_replace() {
        let mut map: Map<String, i32> = Map::new();
        assert!(map.is_empty());

        assert_eq!(map.put("one".to_string(), 1), None);
        assert_eq!(map.put("two".to_string(), 2), None);
        assert_eq!(map.get("one"), Some(&1));
        assert_eq!(map.len(), 2);

        assert_eq!(map.put("one".to_string(), 11), Some(1));
        assert_eq!(map.get("one"), Some(&11));
        assert_eq!(map.len(), 2);
    }

    /// Invariant: borrowed lookups work (store `String`, query `&str`).
    #[test]
    fn borrowed_lookups() {
        let mut map: Map<String, i32> = Map::new();
        map.put("hello".to_string(), 1);
        assert!(map.contains_key("hello"));
        assert!(!map.contains_key("world"));
        assert_eq!(map.remove("hello"), Some(1));
        assert_eq!(map.remove("hello"), None);
    }

    /// Invariant: get_mut mutations are visible to later lookups.
    #[test]
    fn get_mut_updates_in_place() {
        let mut map: Map<&str, i32> = Map::new();
        map.put("k", 10);
        *map.get_mut("k").unwrap() += 5;
        assert_eq!(map.get("k"), Some(&15));
    }

    /// Invariant: a map that grew several times still resolves every
    /// key, and its capacity stayed a power of two.
    #[test]
    fn growth_preserves_content() {
        let mut map: Map<i32, i32> = Map::with_capacity_and_load_factor(4, 0.8);
        for k in 0..100 {
            map.put(k, k * 2);
            assert!(map.capacity().is_power_of_two());
        }
        assert_eq!(map.len(), 100);
        for k in 0..100 {
            assert_eq!(map.get(&k), Some(&(k * 2)));
        }
        assert!(map.retired_count() > 0);
        map.clear_retired_arrays();
        assert_eq!(map.retired_count(), 0);
        assert_eq!(map.get(&42), Some(&84));
    }

    /// Invariant: iteration agrees with size and yields each mapping
    /// exactly once.
    #[test]
    fn iteration_matches_content() {
        let mut map: Map<i32, i32> = Map::with_capacity(8);
        for k in 0..10 {
            map.put(k, -k);
        }
        let mut pairs: Vec<(i32, i32)> = map.iter().map(|(&k, &v)| (k, v)).collect();
        pairs.sort_unstable();
        assert_eq!(pairs.len(), map.len());
        assert_eq!(pairs, (0..10).map(|k| (k, -k)).collect::<Vec<_>>());
    }

    /// Invariant: the cursor yields values, exposes the matching key,
    /// and removal through it behaves like `remove`.
    #[test]
    fn cursor_pass_with_removal() {
        let mut map: Map<String, i32> = Map::with_capacity(8);
        for (k, v) in [("a", 1), ("b", 2), ("c", 3)] {
            map.put(k.to_string(), v);
        }

        let mut cursor = map.cursor();
        while let Some(&v) = cursor.next() {
            let key = cursor.key().unwrap().clone();
            assert_eq!(key.len(), 1);
            if v == 2 {
                assert_eq!(cursor.remove(), Some(2));
                assert_eq!(cursor.key(), None);
            }
        }

        assert_eq!(map.len(), 2);
        assert!(!map.contains_key("b"));
        assert!(map.contains_key("a"));
        assert!(map.contains_key("c"));
    }

    /// Invariant: clear empties the map and pooled entries are reused
    /// for subsequent puts.
    #[test]
    fn clear_and_reuse() {
        let mut map: Map<i32, String> = Map::with_capacity(4);
        for k in 0..20 {
            map.put(k, k.to_string());
        }
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.get(&3), None);

        map.put(3, "three".to_string());
        assert_eq!(map.get(&3).map(String::as_str), Some("three"));
        assert_eq!(map.len(), 1);
    }
}
