//! Map keyed by variable-length string slices.
//!
//! The string twin of [`BytesMap`](crate::bytes_map::BytesMap): keys
//! are copied into recycled per-entry `String` buffers and hashed with
//! a 31-multiplier polynomial over their `char`s. The maximum key
//! length is measured in bytes (the `str::len` measure), which is also
//! the capacity the pooled buffers are built with.

use crate::bytes_map::{KeyTooLong, DEFAULT_MAX_KEY_LENGTH};
use crate::raw::{KeySpec, RawCursor, RawIter, RawPoolTable, DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR};

fn hash_str(key: &str) -> u64 {
    let mut hash: u64 = 0;
    for ch in key.chars() {
        hash = hash.wrapping_mul(31).wrapping_add(u64::from(ch));
    }
    hash
}

fn recycle_buffer(mut buffer: String) -> Option<String> {
    buffer.clear();
    Some(buffer)
}

struct StrKey<'a> {
    text: &'a str,
    max_key_len: usize,
}

impl KeySpec<String> for StrKey<'_> {
    fn matches(&self, stored: &String) -> bool {
        stored == self.text
    }

    fn into_stored(self, recycled: Option<String>) -> String {
        // Recycled buffers arrive cleared with full capacity.
        let mut buffer = recycled.unwrap_or_else(|| String::with_capacity(self.max_key_len));
        buffer.push_str(self.text);
        buffer
    }
}

/// A chained hash map keyed by `&str` slices up to a configured maximum
/// byte length, with pooled entries, recycled key buffers, and a
/// removal-capable cursor.
///
/// `put` with an oversized key fails with [`KeyTooLong`]; lookups and
/// removals with one simply report absence.
pub struct StrMap<V> {
    table: RawPoolTable<String, V>,
    max_key_len: usize,
}

impl<V> StrMap<V> {
    /// Creates a map with the default capacity (128), maximum key
    /// length (256 bytes), and load factor (0.80).
    pub fn new() -> Self {
        Self::with_parameters(DEFAULT_INITIAL_CAPACITY, DEFAULT_MAX_KEY_LENGTH, DEFAULT_LOAD_FACTOR)
    }

    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_parameters(capacity, DEFAULT_MAX_KEY_LENGTH, DEFAULT_LOAD_FACTOR)
    }

    pub fn with_max_key_len(max_key_len: usize) -> Self {
        Self::with_parameters(DEFAULT_INITIAL_CAPACITY, max_key_len, DEFAULT_LOAD_FACTOR)
    }

    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn with_capacity_and_max_key_len(capacity: usize, max_key_len: usize) -> Self {
        Self::with_parameters(capacity, max_key_len, DEFAULT_LOAD_FACTOR)
    }

    /// Fully parameterized constructor. Key buffers for the first
    /// `threshold` entries are preallocated at `max_key_len` capacity.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero or `load_factor` is not a positive
    /// finite number.
    pub fn with_parameters(capacity: usize, max_key_len: usize, load_factor: f32) -> Self {
        let mut table = RawPoolTable::new(capacity, load_factor, recycle_buffer);
        let prebuilt = table.threshold();
        table.prefill_key_storage((0..prebuilt).map(|_| String::with_capacity(max_key_len)));
        Self { table, max_key_len }
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

    /// Longest key, in bytes, this map accepts.
    pub fn max_key_len(&self) -> usize {
        self.max_key_len
    }

    pub fn contains_key(&self, key: &str) -> bool {
        if key.len() > self.max_key_len {
            return false;
        }
        self.table.contains(hash_str(key), |stored| stored == key)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        if key.len() > self.max_key_len {
            return None;
        }
        self.table.get(hash_str(key), |stored| stored == key)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        if key.len() > self.max_key_len {
            return None;
        }
        self.table.get_mut(hash_str(key), |stored| stored == key)
    }

    /// Copies `key` into a pooled buffer and maps it to `value`,
    /// returning the previous value on replacement.
    pub fn put(&mut self, key: &str, value: V) -> Result<Option<V>, KeyTooLong> {
        if key.len() > self.max_key_len {
            return Err(KeyTooLong {
                len: key.len(),
                max: self.max_key_len,
            });
        }
        let spec = StrKey {
            text: key,
            max_key_len: self.max_key_len,
        };
        Ok(self.table.insert(hash_str(key), spec, value))
    }

    pub fn remove(&mut self, key: &str) -> Option<V> {
        if key.len() > self.max_key_len {
            return None;
        }
        self.table.remove(hash_str(key), |stored| stored == key)
    }

    /// Removes every mapping. Capacity is retained and the key buffers
    /// stay pooled.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    pub fn retired_count(&self) -> usize {
        self.table.retired_count()
    }

    pub fn clear_retired_arrays(&mut self) {
        self.table.clear_retired_arrays();
    }

    /// Read-only iteration over `(&str, &V)` pairs.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            inner: self.table.iter(),
        }
    }

    /// Starts a removal-capable pass over the map.
    pub fn cursor(&mut self) -> Cursor<'_, V> {
        Cursor {
            inner: self.table.cursor(),
        }
    }
}

impl<V> Default for StrMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over `(&str, &V)` pairs of a [`StrMap`].
pub struct Iter<'a, V> {
    inner: RawIter<'a, String, V>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, v)| (k.as_str(), v))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// Removal-capable traversal over a [`StrMap`].
pub struct Cursor<'a, V> {
    inner: RawCursor<'a, String, V>,
}

impl<V> Cursor<'_, V> {
    pub fn has_next(&self) -> bool {
        self.inner.has_next()
    }

    /// Advances and returns the next value, or `None` once exhausted.
    pub fn next(&mut self) -> Option<&V> {
        self.inner.next()?;
        self.inner.value()
    }

    /// Key of the entry `next` last returned.
    pub fn key(&self) -> Option<&str> {
        self.inner.key().map(String::as_str)
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
