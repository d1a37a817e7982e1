//! Entry: one key/attribute record, doubling as a node in a bucket's chain.
//!
//! Nodes live in the table's slot arena; a chain is the sequence reached by
//! following `next` links from a bucket head. Storing arena keys instead of
//! boxed successors keeps splicing O(1) and rules out dangling links: a
//! removed node is taken out of the arena and handed back by value.

use crate::error::TableError;
use crate::value::{Attributes, Value};
use core::fmt;
use slotmap::{DefaultKey, SlotMap};

pub(crate) type Arena<V> = SlotMap<DefaultKey, Entry<V>>;

pub struct Entry<V = Value> {
    key: String,
    attributes: Attributes<V>,
    pub(crate) next: Option<DefaultKey>,
}

impl<V> Entry<V> {
    pub fn new(key: impl Into<String>, attributes: Attributes<V>) -> Self {
        Self {
            key: key.into(),
            attributes,
            next: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn attributes(&self) -> &Attributes<V> {
        &self.attributes
    }

    /// Mutable access to the attribute set; the key stays fixed.
    pub fn attributes_mut(&mut self) -> &mut Attributes<V> {
        &mut self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&V> {
        self.attributes.get(name)
    }

    /// True iff this entry is stored under `key`.
    #[inline]
    pub fn matches(&self, key: &str) -> bool {
        self.key == key
    }

    pub fn into_parts(self) -> (String, Attributes<V>) {
        (self.key, self.attributes)
    }
}

// Identity is the key alone; attribute payloads are not compared.
impl<V> PartialEq for Entry<V> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<V> Eq for Entry<V> {}

impl<V> PartialEq<str> for Entry<V> {
    fn eq(&self, other: &str) -> bool {
        self.matches(other)
    }
}

impl<V> PartialEq<&str> for Entry<V> {
    fn eq(&self, other: &&str) -> bool {
        self.matches(other)
    }
}

impl<V> PartialEq<String> for Entry<V> {
    fn eq(&self, other: &String) -> bool {
        self.matches(other)
    }
}

/// Renders the key alone, honouring width and alignment flags.
impl<V> fmt::Display for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.key)
    }
}

impl<V: fmt::Debug> fmt::Debug for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("key", &self.key)
            .field("attributes", &self.attributes)
            .finish()
    }
}

/// Lazy walk over a chain in link order. Cloning restarts from the same node.
pub struct Chain<'a, V> {
    arena: &'a Arena<V>,
    cursor: Option<DefaultKey>,
}

impl<'a, V> Chain<'a, V> {
    pub(crate) fn new(arena: &'a Arena<V>, head: Option<DefaultKey>) -> Self {
        Self {
            arena,
            cursor: head,
        }
    }
}

impl<V> Clone for Chain<'_, V> {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena,
            cursor: self.cursor,
        }
    }
}

impl<'a, V> Iterator for Chain<'a, V> {
    type Item = &'a Entry<V>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.arena.get(self.cursor?)?;
        self.cursor = entry.next;
        Some(entry)
    }
}

impl<V> core::iter::FusedIterator for Chain<'_, V> {}

/// Arena key of the node matching `key` in the chain starting at `head`.
pub(crate) fn locate<V>(arena: &Arena<V>, head: Option<DefaultKey>, key: &str) -> Option<DefaultKey> {
    let mut cursor = head;
    while let Some(k) = cursor {
        let node = arena.get(k)?;
        if node.matches(key) {
            return Some(k);
        }
        cursor = node.next;
    }
    None
}

/// Links `entry` as the new tail of the chain starting at `head`.
///
/// Every node on the way, the head included, is checked against the new key;
/// this is the only place duplicates are rejected. On success returns the
/// new node's arena key and the chain length including it. On failure the
/// arena is untouched.
pub(crate) fn append<V>(
    arena: &mut Arena<V>,
    head: DefaultKey,
    entry: Entry<V>,
) -> Result<(DefaultKey, usize), TableError> {
    let mut tail = head;
    let mut len = 0;
    for node in Chain::new(arena, Some(head)) {
        if node.matches(&entry.key) {
            return Err(TableError::KeyAlreadyExists(entry.key));
        }
        len += 1;
        if let Some(next) = node.next {
            tail = next;
        }
    }
    let added = arena.insert(entry);
    arena[tail].next = Some(added);
    Ok((added, len + 1))
}
