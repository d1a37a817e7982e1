//! chained-table: a fixed-capacity hash table from string keys to attribute
//! sets, resolving collisions by separate chaining.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: keep the collision-resolution engine small enough to verify by
//!   reading: hash to a bucket, then walk that bucket's chain.
//! - Layers:
//!   - Entry: one key/attribute record and a node of its bucket's chain.
//!     Owns the chain primitives (walk, locate, append with duplicate
//!     rejection).
//!   - HashTable<V, H>: `capacity` bucket slots, each empty or holding a
//!     chain head, plus the pluggable bucket hash `H`. Public map operations
//!     live here.
//!
//! Constraints
//! - Capacity is fixed at construction (zero is rejected). No resizing:
//!   once buckets are shared, insertion still succeeds by chaining.
//! - Keys are unique across the whole table; duplicate inserts fail and
//!   leave the table unchanged. Updating is a separate operation.
//! - Iteration is bucket-major, chain-minor. Deterministic for a fixed hash
//!   and insertion history, but not insertion order.
//! - Single-threaded; mutation needs `&mut HashTable`.
//!
//! Storage
//! - Chain nodes live in a `slotmap::SlotMap`. Bucket slots and `next`
//!   links hold arena keys, so splicing a node out rewrites one link and
//!   frees one slot. A removed entry is returned by value with its link
//!   cleared.
//!
//! Hash contract
//! - A bucket hash maps `(key, capacity)` into `0..capacity`. User hashes are
//!   checked on every call; a violation fails the operation with
//!   `HashOutOfRange`.
//!
//! Notes and non-goals
//! - No rehashing, no thread safety, no persistence, no non-string keys.
//! - The default hash is deterministic but not collision resistant.
//! - `Display` renders one line per bucket for logging and debugging.

mod entry;
mod error;
mod hash_table;
mod hash_table_proptest;
pub mod hasher;
mod value;

// Public surface
pub use entry::{Chain, Entry};
pub use error::TableError;
pub use hash_table::{Bucket, HashTable, HashTableBuilder, Iter, Keys, Values};
pub use hasher::{BucketHash, DefaultBucketHash};
pub use value::{Attributes, Value};
