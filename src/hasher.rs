//! Bucket selection: the one configurable seam of a [`HashTable`].
//!
//! A bucket hash maps `(key, capacity)` to an index that must fall in
//! `0..capacity`. The table checks that contract on every call and rejects
//! out-of-range indices with [`TableError::HashOutOfRange`] instead of
//! indexing out of bounds.
//!
//! [`HashTable`]: crate::HashTable
//! [`TableError::HashOutOfRange`]: crate::TableError::HashOutOfRange

use core::hash::{BuildHasher, BuildHasherDefault};
use std::collections::hash_map::DefaultHasher;

pub trait BucketHash {
    /// Returns the bucket for `key` in a table of `capacity` buckets.
    fn bucket(&self, key: &str, capacity: usize) -> usize;
}

/// Any `Fn(&str, usize) -> usize` is a bucket hash, so closures and plain
/// functions plug in directly.
impl<F> BucketHash for F
where
    F: Fn(&str, usize) -> usize,
{
    #[inline]
    fn bucket(&self, key: &str, capacity: usize) -> usize {
        self(key, capacity)
    }
}

/// Hashes the key with a [`BuildHasher`] and reduces it modulo the capacity.
///
/// The default builder uses fixed keys, so bucket placement (and therefore
/// iteration order) is reproducible across processes. Pass a randomly seeded
/// builder through [`with_hasher`](Self::with_hasher) to opt out.
#[derive(Clone, Debug, Default)]
pub struct DefaultBucketHash<S = BuildHasherDefault<DefaultHasher>> {
    hasher: S,
}

impl DefaultBucketHash {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: BuildHasher> DefaultBucketHash<S> {
    pub fn with_hasher(hasher: S) -> Self {
        Self { hasher }
    }
}

impl<S: BuildHasher> BucketHash for DefaultBucketHash<S> {
    #[inline]
    fn bucket(&self, key: &str, capacity: usize) -> usize {
        debug_assert!(capacity > 0);
        (self.hasher.hash_one(key) % capacity as u64) as usize
    }
}
