//! pooled-collections: single-threaded container primitives that reuse
//! pooled entries for allocation-free steady-state operation.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: build the map family in layers so each piece can be reasoned
//!   about independently, with one shared engine instead of one engine
//!   per key type.
//! - Layers:
//!   - `pool::EntryPool<K, V>`: slab storage for bucket-chain entries
//!     behind stable, generational `EntryRef` keys (slotmap); freed
//!     slots and key buffers are recycled instead of deallocated.
//!   - `raw::RawPoolTable<K, V>`: the chained hash table proper: bucket
//!     indexing, collision chains, threshold-driven doubling with
//!     in-place entry migration, a retired-array registry, and a
//!     removal-capable cursor. Key-agnostic: operations take a
//!     precomputed hash plus an equality predicate (insertion takes a
//!     `KeySpec` that can also materialize the stored key).
//!   - Public variants: [`Map`] (generic `Eq + Hash` keys through a
//!     `BuildHasher`), [`IntMap`]/[`LongMap`] (the key is the hash),
//!     [`IdentityMap`] (`Rc` keys by pointer identity), [`BytesMap`] /
//!     [`StrMap`] (variable-length keys copied into recycled
//!     fixed-capacity buffers), [`ByteMap`]/[`CharMap`] (direct-indexed
//!     256-slot arrays, no hashing), and the sets layered on the maps.
//!   - [`LinkedList`]: a pooled deque used by the engine's retired-array
//!     registry and usable on its own.
//!
//! Constraints
//! - Single-threaded by design; all mutation goes through `&mut self`,
//!   so exclusive access is enforced by the borrow checker rather than
//!   documentation.
//! - Steady-state operation performs no heap allocation: removed
//!   entries return to the pool, growth relinks pooled entries without
//!   reallocating them, and cursors live on the stack.
//! - Capacity never shrinks; a power-of-two initial capacity stays a
//!   power of two across growth, keeping slot selection a bitwise mask.
//! - Stable handles: `EntryRef`s held by the table survive pool growth,
//!   and a released ref can never alias a recycled slot (generational
//!   keys).
//!
//! Hashing and rehashing invariants
//! - Each entry stores its `u64` hash; growth re-links entries from the
//!   stored hash, so user `Hash`/`Eq` code never runs during a rehash.
//! - Superseded bucket arrays are scrubbed of entry references and
//!   parked in a registry the engine never reads again; dropping them
//!   (`clear_retired_arrays`) is purely a memory-pressure hint.
//!
//! Notes and non-goals
//! - No thread safety and no synchronization: the types stay ordinary
//!   `Send`/`Sync` where their parameters allow, because exclusive
//!   access, not interior mutability, is the concurrency story.
//! - No capacity shrinking, no ordering guarantees among entries, no
//!   randomized-hashing hardening beyond what the chosen `BuildHasher`
//!   provides.
//! - Cursor passes cannot overlap: a cursor borrows its map mutably
//!   for the duration of the pass.

pub mod bytes_map;
pub mod fixed_map;
pub mod identity_map;
pub mod linked_list;
pub mod map;
mod pool;
pub mod raw;
pub mod scalar_map;
pub mod set;
pub mod str_map;

// Public surface
pub use bytes_map::{BytesMap, KeyTooLong, DEFAULT_MAX_KEY_LENGTH};
pub use fixed_map::{ByteMap, CharMap};
pub use identity_map::IdentityMap;
pub use linked_list::LinkedList;
pub use map::Map;
pub use raw::{DEFAULT_INITIAL_CAPACITY, DEFAULT_LOAD_FACTOR};
pub use scalar_map::{IntMap, LongMap, ScalarKey, ScalarMap};
pub use set::{IdentitySet, IntSet, LongSet, ScalarSet, Set};
pub use str_map::StrMap;
