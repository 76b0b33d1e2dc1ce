//! Entry pool: slab-backed storage for bucket-chain entries.
//!
//! Entries are stored in a `SlotMap` and addressed by stable,
//! generational `EntryRef` keys, so references held by the bucket table
//! survive slab growth and a stale reference can never alias a recycled
//! slot. Freed slots are reused by the slab itself; key storage that is
//! worth keeping (the fixed-capacity buffers of the byte/char-sequence
//! maps) is routed through a spare stack by the `reclaim` hook instead
//! of being dropped with the entry.

use slotmap::SlotMap;

slotmap::new_key_type! {
    /// Stable handle to a pooled entry.
    pub struct EntryRef;
}

/// One bucket-chain node. Linked into exactly one chain while owned by
/// the table; unreachable from any chain while its slot is free.
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) hash: u64,
    pub(crate) value: V,
    pub(crate) next: Option<EntryRef>,
}

/// Drops released key storage; the default `reclaim` hook for maps
/// whose keys carry no reusable buffer.
pub fn discard_key<K>(_key: K) -> Option<K> {
    None
}

pub(crate) struct EntryPool<K, V> {
    slots: SlotMap<EntryRef, Entry<K, V>>,
    spare_keys: Vec<K>,
    reclaim: fn(K) -> Option<K>,
}

impl<K, V> EntryPool<K, V> {
    /// Creates a pool with `capacity` entry slots preallocated.
    pub(crate) fn with_capacity(capacity: usize, reclaim: fn(K) -> Option<K>) -> Self {
        Self {
            slots: SlotMap::with_capacity_and_key(capacity),
            spare_keys: Vec::new(),
            reclaim,
        }
    }

    /// Stocks the spare-key stack, so the first acquisitions can reuse
    /// prebuilt key storage instead of allocating it.
    pub(crate) fn prefill_spares(&mut self, keys: impl IntoIterator<Item = K>) {
        self.spare_keys.extend(keys);
    }

    /// Hands out a linked-ready entry. `make_key` receives recycled key
    /// storage when the spare stack has any.
    pub(crate) fn acquire(
        &mut self,
        make_key: impl FnOnce(Option<K>) -> K,
        hash: u64,
        value: V,
        next: Option<EntryRef>,
    ) -> EntryRef {
        let key = make_key(self.spare_keys.pop());
        self.slots.insert(Entry {
            key,
            hash,
            value,
            next,
        })
    }

    /// Reclaims an entry's slot, routes its key through the `reclaim`
    /// hook, and returns its value and cached next link.
    pub(crate) fn release(&mut self, entry: EntryRef) -> (V, Option<EntryRef>) {
        let Entry {
            key, value, next, ..
        } = self.slots.remove(entry).unwrap();
        if let Some(spare) = (self.reclaim)(key) {
            self.spare_keys.push(spare);
        }
        (value, next)
    }

    pub(crate) fn get(&self, entry: EntryRef) -> &Entry<K, V> {
        &self.slots[entry]
    }

    pub(crate) fn get_mut(&mut self, entry: EntryRef) -> &mut Entry<K, V> {
        &mut self.slots[entry]
    }

    #[cfg(test)]
    pub(crate) fn live(&self) -> usize {
        self.slots.len()
    }
}
