//! HashTable: fixed bucket array with separately chained entries.

use crate::entry::{self, Arena, Chain, Entry};
use crate::error::TableError;
use crate::hasher::{BucketHash, DefaultBucketHash};
use crate::value::{Attributes, Value};
use core::fmt;
use log::{debug, trace, warn};
use slotmap::DefaultKey;

/// A hash table with a fixed number of buckets.
///
/// Keys are strings; each maps to an attribute set. Collisions are resolved
/// by chaining inside the bucket, so the table never resizes and never fills
/// up: it only degrades into longer chains.
pub struct HashTable<V = Value, H = DefaultBucketHash> {
    capacity: usize,
    buckets: Box<[Option<DefaultKey>]>,
    entries: Arena<V>,
    hash: H,
}

/// Read-only view of one bucket slot, as returned by [`HashTable::bucket`].
pub struct Bucket<'a, V> {
    index: usize,
    chain: Chain<'a, V>,
}

impl<'a, V> Bucket<'a, V> {
    pub fn index(&self) -> usize {
        self.index
    }

    /// The chain head, or `None` for an empty slot.
    pub fn head(&self) -> Option<&'a Entry<V>> {
        self.chain.clone().next()
    }

    pub fn iter(&self) -> Chain<'a, V> {
        self.chain.clone()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.head().is_none()
    }
}

impl<'a, V> IntoIterator for Bucket<'a, V> {
    type Item = &'a Entry<V>;
    type IntoIter = Chain<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.chain
    }
}

/// Iterator over `(key, attributes)` in bucket-major, chain-minor order.
pub struct Iter<'a, V> {
    entries: &'a Arena<V>,
    buckets: core::slice::Iter<'a, Option<DefaultKey>>,
    chain: Chain<'a, V>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a Attributes<V>);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(e) = self.chain.next() {
                return Some((e.key(), e.attributes()));
            }
            let head = *self.buckets.next()?;
            self.chain = Chain::new(self.entries, head);
        }
    }
}

/// Keys in iteration order.
pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Keys<'a, V> {
    type Item = &'a str;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

/// Attribute sets in iteration order.
pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a Attributes<V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, v)| v)
    }
}

fn key_not_found(key: &str) -> TableError {
    TableError::KeyNotFound(key.to_owned())
}

impl<V> HashTable<V> {
    /// Creates a table of `capacity` empty buckets using the default hash.
    pub fn new(capacity: usize) -> Result<Self, TableError> {
        Self::with_hash(capacity, DefaultBucketHash::new())
    }
}

impl<V, H> HashTable<V, H>
where
    H: BucketHash,
{
    /// Creates a table of `capacity` empty buckets placing keys with `hash`.
    ///
    /// Fails with [`TableError::InvalidCapacity`] when `capacity` is zero.
    pub fn with_hash(capacity: usize, hash: H) -> Result<Self, TableError> {
        if capacity == 0 {
            return Err(TableError::InvalidCapacity(capacity));
        }
        debug!("new hash table with {capacity} buckets");
        Ok(Self {
            capacity,
            buckets: vec![None; capacity].into_boxed_slice(),
            entries: Arena::with_capacity(capacity),
            hash,
        })
    }

    pub(crate) fn index_for(&self, key: &str) -> Result<usize, TableError> {
        let index = self.hash.bucket(key, self.capacity);
        if index >= self.capacity {
            warn!(
                "bucket hash placed {key:?} at {index}, outside 0..{}",
                self.capacity
            );
            return Err(TableError::HashOutOfRange {
                key: key.to_owned(),
                index,
                capacity: self.capacity,
            });
        }
        Ok(index)
    }

    /// Inserts a new key. Duplicates are rejected with
    /// [`TableError::KeyAlreadyExists`] and leave the table unchanged; use
    /// [`update`](Self::update) to change an existing entry.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        attributes: Attributes<V>,
    ) -> Result<(), TableError> {
        let node = Entry::new(key, attributes);
        let index = self.index_for(node.key())?;
        let (added, chain_len) = match self.buckets[index] {
            None => {
                let added = self.entries.insert(node);
                self.buckets[index] = Some(added);
                (added, 1)
            }
            Some(head) => entry::append(&mut self.entries, head, node)?,
        };
        trace!(
            "inserted {:?} into bucket {index} (chain length {chain_len})",
            self.entries[added].key()
        );
        Ok(())
    }

    /// Returns the entry stored under `key`.
    pub fn find(&self, key: &str) -> Result<&Entry<V>, TableError> {
        let index = self.index_for(key)?;
        self.chain(index)
            .find(|e| e.matches(key))
            .ok_or_else(|| key_not_found(key))
    }

    /// Like [`find`](Self::find), but the attributes can be changed in place.
    pub fn find_mut(&mut self, key: &str) -> Result<&mut Entry<V>, TableError> {
        let index = self.index_for(key)?;
        entry::locate(&self.entries, self.buckets[index], key)
            .and_then(|k| self.entries.get_mut(k))
            .ok_or_else(|| key_not_found(key))
    }

    pub fn get(&self, key: &str) -> Option<&Attributes<V>> {
        self.find(key).ok().map(Entry::attributes)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut Attributes<V>> {
        self.find_mut(key).ok().map(Entry::attributes_mut)
    }

    /// Merges `attributes` into an existing entry, overwriting names that are
    /// already set and keeping the rest. Returns `Ok(false)` and stores
    /// nothing when `key` is absent.
    pub fn update(&mut self, key: &str, attributes: Attributes<V>) -> Result<bool, TableError> {
        match self.find_mut(key) {
            Ok(entry) => {
                entry.attributes_mut().extend(attributes);
                Ok(true)
            }
            Err(TableError::KeyNotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Updates `key` if present, otherwise inserts it. Returns `true` when an
    /// existing entry was updated.
    pub fn update_or_insert(
        &mut self,
        key: impl Into<String>,
        attributes: Attributes<V>,
    ) -> Result<bool, TableError> {
        let key = key.into();
        match self.find_mut(&key) {
            Ok(entry) => {
                entry.attributes_mut().extend(attributes);
                Ok(true)
            }
            Err(TableError::KeyNotFound(_)) => self.insert(key, attributes).map(|()| false),
            Err(e) => Err(e),
        }
    }

    /// Unlinks the entry stored under `key` and returns it.
    ///
    /// Removing the bucket head hands the rest of the chain to the bucket
    /// slot; removing any later node hands it to the predecessor.
    pub fn remove(&mut self, key: &str) -> Result<Entry<V>, TableError> {
        let index = self.index_for(key)?;
        let head = self.buckets[index].ok_or_else(|| key_not_found(key))?;

        let removed = if self.entries[head].matches(key) {
            self.buckets[index] = self.entries[head].next;
            head
        } else {
            let mut prev = head;
            loop {
                let Some(current) = self.entries[prev].next else {
                    return Err(key_not_found(key));
                };
                if self.entries[current].matches(key) {
                    self.entries[prev].next = self.entries[current].next;
                    break current;
                }
                prev = current;
            }
        };

        let mut entry = self.entries.remove(removed).ok_or_else(|| key_not_found(key))?;
        entry.next = None;
        debug!("removed {key:?} from bucket {index}");
        Ok(entry)
    }

    /// True iff `find(key)` would succeed. Never fails.
    pub fn contains(&self, key: &str) -> bool {
        self.find(key).is_ok()
    }
}

impl<V, H> HashTable<V, H> {
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn chain(&self, index: usize) -> Chain<'_, V> {
        Chain::new(&self.entries, self.buckets[index])
    }

    /// The raw bucket slot at `index`: possibly empty, possibly a chain head.
    pub fn bucket(&self, index: usize) -> Result<Bucket<'_, V>, TableError> {
        if index >= self.capacity {
            return Err(TableError::BucketOutOfRange {
                index,
                capacity: self.capacity,
            });
        }
        Ok(Bucket {
            index,
            chain: self.chain(index),
        })
    }

    /// Chain length of every bucket, by bucket index.
    pub fn chain_lengths(&self) -> Vec<usize> {
        (0..self.capacity).map(|i| self.chain(i).count()).collect()
    }

    /// `(key, attributes)` pairs in bucket-major, chain-minor order. This is
    /// deterministic for a given hash and history, but not insertion order.
    pub fn items(&self) -> Iter<'_, V> {
        Iter {
            entries: &self.entries,
            buckets: self.buckets.iter(),
            chain: Chain::new(&self.entries, None),
        }
    }

    pub fn iter(&self) -> Iter<'_, V> {
        self.items()
    }

    pub fn keys(&self) -> Keys<'_, V> {
        Keys {
            inner: self.items(),
        }
    }

    pub fn values(&self) -> Values<'_, V> {
        Values {
            inner: self.items(),
        }
    }
}

impl<'a, V, H> IntoIterator for &'a HashTable<V, H> {
    type Item = (&'a str, &'a Attributes<V>);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.items()
    }
}

/// One line per bucket: the index, then each chained key centred in a
/// column as wide as the longest key plus two. Empty buckets show a blank
/// column.
///
/// ```text
/// HashTable(
///     0 ---  Reka   ---  Turid
///     1 ---
/// )
/// ```
impl<V, H> fmt::Display for HashTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self.keys().map(|k| k.chars().count()).max().unwrap_or(0) + 2;
        writeln!(f, "HashTable(")?;
        for index in 0..self.capacity {
            write!(f, "\t{index} --- ")?;
            let mut chain = self.chain(index);
            match chain.next() {
                None => write!(f, "{:width$}", "")?,
                Some(head) => {
                    write!(f, "{head:^width$}")?;
                    for e in chain {
                        write!(f, " --- {e:^width$}")?;
                    }
                }
            }
            writeln!(f)?;
        }
        f.write_str(")")
    }
}

impl<V: fmt::Debug, H> fmt::Debug for HashTable<V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.items()).finish()
    }
}

/// Builder for tables with a non-default bucket hash.
///
/// ```
/// use chained_table::{HashTableBuilder, Value};
///
/// let table = HashTableBuilder::with_capacity(4)
///     .hash(|key: &str, capacity: usize| key.len() % capacity)
///     .build::<Value>()
///     .unwrap();
/// assert_eq!(table.capacity(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct HashTableBuilder<H = DefaultBucketHash> {
    capacity: usize,
    hash: H,
}

impl HashTableBuilder {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            hash: DefaultBucketHash::new(),
        }
    }
}

impl<H: BucketHash> HashTableBuilder<H> {
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn hash<T: BucketHash>(self, hash: T) -> HashTableBuilder<T> {
        HashTableBuilder {
            capacity: self.capacity,
            hash,
        }
    }

    pub fn build<V>(self) -> Result<HashTable<V, H>, TableError> {
        HashTable::with_hash(self.capacity, self.hash)
    }
}
