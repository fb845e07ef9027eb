use alloc::boxed::Box;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::hash::{BuildHasher, Hash};
use core::mem;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{ListNode, Slot};

/// One chain of the table: a doubly linked list between two permanent sentinels.
#[derive(Clone, Copy, Debug)]
struct Bucket {
    head: Handle,
    tail: Handle,
    /// Number of entry nodes, sentinels excluded.
    len: usize,
}

/// Location of an entry: its bucket and its list node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Position {
    pub(crate) bucket: usize,
    pub(crate) node: Handle,
}

/// The list nodes and bucket array of a hash table, without the values.
pub(crate) struct BucketLinks<K> {
    nodes: Arena<ListNode<K>>,
    buckets: Box<[Bucket]>,
}

/// The core chained hash table backing `HashMap`.
///
/// The bucket count is fixed for the table's lifetime; chains grow without rehashing.
pub(crate) struct RawHashTable<K, V, S> {
    links: BucketLinks<K>,
    /// Values, kept apart from nodes so that `IterMut` can borrow them independently.
    values: Arena<V>,
    /// Total number of entries across all buckets.
    len: usize,
    hasher: S,
}

/// Read-only view of a table's structure and values, free of the hasher type.
pub(crate) struct Entries<'a, K, V> {
    links: &'a BucketLinks<K>,
    values: &'a Arena<V>,
}

impl<K, V> Clone for Entries<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Entries<'_, K, V> {}

impl<'a, K, V> Entries<'a, K, V> {
    pub(crate) const fn links(self) -> &'a BucketLinks<K> {
        self.links
    }

    /// Returns the key and value stored at `at`.
    pub(crate) fn entry(self, at: Position) -> (&'a K, &'a V) {
        let (key, value) = self.links.node(at.node).entry_parts();
        (key, self.values.get(value))
    }
}

impl<K> BucketLinks<K> {
    fn new(bucket_count: usize) -> Self {
        let mut nodes = Arena::with_capacity(bucket_count * 2);
        let buckets = (0..bucket_count).map(|_| Self::link_sentinels(&mut nodes)).collect();
        Self { nodes, buckets }
    }

    fn link_sentinels(nodes: &mut Arena<ListNode<K>>) -> Bucket {
        let head = nodes.alloc(ListNode::sentinel());
        let tail = nodes.alloc(ListNode::sentinel());
        nodes.get_mut(head).next = Some(tail);
        nodes.get_mut(tail).prev = Some(head);
        Bucket { head, tail, len: 0 }
    }

    /// Drops every entry and rebuilds the sentinels of every bucket.
    fn clear(&mut self) {
        self.nodes.clear();
        for bucket in self.buckets.iter_mut() {
            *bucket = Self::link_sentinels(&mut self.nodes);
        }
    }

    pub(crate) fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    pub(crate) fn bucket_len(&self, bucket: usize) -> usize {
        self.buckets[bucket].len
    }

    /// Returns a list node by handle.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &ListNode<K> {
        self.nodes.get(handle)
    }

    fn first_in(&self, bucket: usize) -> Option<Handle> {
        let bucket = &self.buckets[bucket];
        if bucket.len == 0 {
            return None;
        }
        self.nodes.get(bucket.head).next
    }

    fn last_in(&self, bucket: usize) -> Option<Handle> {
        let bucket = &self.buckets[bucket];
        if bucket.len == 0 {
            return None;
        }
        self.nodes.get(bucket.tail).prev
    }

    /// First entry of the first non-empty bucket at or after `bucket`.
    fn first_from(&self, bucket: usize) -> Option<Position> {
        (bucket..self.buckets.len()).find_map(|b| self.first_in(b).map(|node| Position { bucket: b, node }))
    }

    /// Last entry of the last non-empty bucket strictly before `bucket`.
    fn last_before(&self, bucket: usize) -> Option<Position> {
        (0..bucket).rev().find_map(|b| self.last_in(b).map(|node| Position { bucket: b, node }))
    }

    /// Position of the first entry in iteration order.
    pub(crate) fn first(&self) -> Option<Position> {
        self.first_from(0)
    }

    /// Position of the last entry in iteration order.
    pub(crate) fn last(&self) -> Option<Position> {
        self.last_before(self.buckets.len())
    }

    /// Position after `at`, skipping empty buckets.
    pub(crate) fn next(&self, at: Position) -> Option<Position> {
        match self.nodes.get(at.node).next {
            Some(next) if !self.nodes.get(next).is_sentinel() => Some(Position {
                bucket: at.bucket,
                node: next,
            }),
            _ => self.first_from(at.bucket + 1),
        }
    }

    /// Position before `at`, skipping empty buckets.
    pub(crate) fn prev(&self, at: Position) -> Option<Position> {
        match self.nodes.get(at.node).prev {
            Some(prev) if !self.nodes.get(prev).is_sentinel() => Some(Position {
                bucket: at.bucket,
                node: prev,
            }),
            _ => self.last_before(at.bucket),
        }
    }

    /// Scans one bucket's entries for `key`.
    fn find_in<Q>(&self, bucket: usize, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        let mut current = self.first_in(bucket);
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            match node.key() {
                Some(k) if k.borrow() == key => return Some(handle),
                Some(_) => current = node.next,
                None => return None,
            }
        }
        None
    }

    /// Links a new entry just before the tail sentinel of `bucket`.
    fn append(&mut self, bucket: usize, key: K, value: Handle) -> Handle {
        let tail = self.buckets[bucket].tail;
        let last = self.nodes.get(tail).prev.expect("tail sentinel is always linked");
        let handle = self.nodes.alloc(ListNode::entry(key, value, last, tail));
        self.nodes.get_mut(last).next = Some(handle);
        self.nodes.get_mut(tail).prev = Some(handle);
        self.buckets[bucket].len += 1;
        handle
    }

    /// Unlinks the entry at `at` and returns its key and value handle.
    fn unlink(&mut self, at: Position) -> (K, Handle) {
        let node = self.nodes.take(at.node);
        let prev = node.prev.expect("entry nodes are always linked");
        let next = node.next.expect("entry nodes are always linked");
        self.nodes.get_mut(prev).next = Some(next);
        self.nodes.get_mut(next).prev = Some(prev);
        self.buckets[at.bucket].len -= 1;

        match node.slot {
            Slot::Entry { key, value } => (key, value),
            Slot::Sentinel => panic!("attempted to unlink a bucket sentinel"),
        }
    }
}

impl<K, V, S> RawHashTable<K, V, S> {
    /// Creates an empty table with `bucket_count` chains.
    pub(crate) fn with_buckets_and_hasher(bucket_count: usize, hasher: S) -> Self {
        assert!(bucket_count > 0, "`RawHashTable` - `bucket_count` must be non-zero!");
        tracing::trace!(bucket_count, "hash table allocated");
        Self {
            links: BucketLinks::new(bucket_count),
            values: Arena::new(),
            len: 0,
            hasher,
        }
    }

    /// Returns the number of key-value pairs in the table.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the table contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) const fn hasher(&self) -> &S {
        &self.hasher
    }

    /// Replaces the hasher. Only valid while the table is empty.
    pub(crate) fn set_hasher(&mut self, hasher: S) {
        debug_assert!(self.is_empty(), "rehashing is not supported");
        self.hasher = hasher;
    }

    /// Returns the bucket structure.
    pub(crate) const fn links(&self) -> &BucketLinks<K> {
        &self.links
    }

    /// Returns a read-only view that iterators and cursors can hold.
    pub(crate) const fn entries(&self) -> Entries<'_, K, V> {
        Entries {
            links: &self.links,
            values: &self.values,
        }
    }

    /// Returns the bucket structure alongside one exclusive reference per value slot.
    pub(crate) fn split_mut(&mut self) -> (&BucketLinks<K>, Vec<Option<&mut V>>) {
        (&self.links, self.values.split_mut())
    }

    /// Returns the key and a mutable reference to the value stored at `at`.
    pub(crate) fn entry_mut(&mut self, at: Position) -> (&K, &mut V) {
        let (key, value) = self.links.nodes.get(at.node).entry_parts();
        (key, self.values.get_mut(value))
    }

    /// Removes the entry at `at`, which must be live.
    pub(crate) fn remove_at(&mut self, at: Position) -> (K, V) {
        let (key, value) = self.links.unlink(at);
        self.len -= 1;
        tracing::trace!(bucket = at.bucket, len = self.len, "hash remove");
        (key, self.values.take(value))
    }

    /// Clears all elements, keeping the bucket count.
    pub(crate) fn clear(&mut self) {
        tracing::trace!(len = self.len, bucket_count = self.links.bucket_count(), "hash clear");
        self.links.clear();
        self.values.clear();
        self.len = 0;
    }

    /// Drains all key-value pairs in iteration order.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let mut positions = Vec::with_capacity(self.len);
        let mut current = self.links.first();
        while let Some(at) = current {
            positions.push(at);
            current = self.links.next(at);
        }

        let entries: Vec<(K, V)> = positions.into_iter().map(|at| self.remove_at(at)).collect();
        debug_assert!(self.values.is_empty());
        self.clear();
        entries
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> RawHashTable<K, V, S> {
    /// Maps a key to its bucket: `hash(key) mod bucket_count`.
    pub(crate) fn bucket_index<Q>(&self, key: &Q) -> usize
    where
        Q: ?Sized + Hash,
    {
        let buckets = self.links.bucket_count() as u64;
        #[allow(clippy::cast_possible_truncation)]
        let index = (self.hasher.hash_one(key) % buckets) as usize;
        index
    }

    /// Finds the entry holding `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Position>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let bucket = self.bucket_index(key);
        let node = self.links.find_in(bucket, key)?;
        Some(Position { bucket, node })
    }

    /// Returns a reference to the value corresponding to the key.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let at = self.search(key)?;
        Some(self.entries().entry(at).1)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let at = self.search(key)?;
        Some(self.entry_mut(at).1)
    }

    /// Inserts a key-value pair, replacing the value in place if the key is
    /// already present. Returns the replaced value.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let bucket = self.bucket_index(&key);
        if let Some(node) = self.links.find_in(bucket, &key) {
            let (_, handle) = self.links.node(node).entry_parts();
            return Some(mem::replace(self.values.get_mut(handle), value));
        }

        let handle = self.values.alloc(value);
        self.links.append(bucket, key, handle);
        self.len += 1;
        None
    }

    /// Returns the value for `key`, appending `make()` to the key's bucket first
    /// if the key is absent.
    pub(crate) fn get_or_insert_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let bucket = self.bucket_index(&key);
        let handle = if let Some(node) = self.links.find_in(bucket, &key) {
            self.links.node(node).entry_parts().1
        } else {
            let handle = self.values.alloc(make());
            self.links.append(bucket, key, handle);
            self.len += 1;
            handle
        };
        self.values.get_mut(handle)
    }

    /// Removes a key from the table, returning the stored key and value.
    /// The table is left untouched when the key is absent.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let at = self.search(key)?;
        Some(self.remove_at(at))
    }
}
