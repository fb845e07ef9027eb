use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::iter::FusedIterator;
use core::ops::Index;

use rustc_hash::FxBuildHasher;

use crate::raw::{BucketLinks, Entries, Position, RawHashTable};
use crate::{Map, MapError, Result};

mod cursor;

pub use cursor::{Cursor, CursorMut};

/// Number of buckets used by [`HashMap::new`] and [`HashMap::default`].
pub const DEFAULT_BUCKETS: usize = 1024;

/// An unordered map based on a fixed array of chained buckets.
///
/// Keys must implement [`Eq`] and [`Hash`]. A key lives in bucket
/// `hash(key) % bucket_count`, and each bucket is a doubly linked list that keeps
/// its entries in insertion order. The bucket count is chosen at construction and
/// never changes: the table does not rehash, so lookups degrade linearly once the
/// load factor grows well past one.
///
/// Iteration visits buckets in ascending index order and each bucket front to back.
/// Keys are hashed with [`FxBuildHasher`] unless another [`BuildHasher`] is supplied.
///
/// # Examples
///
/// ```
/// use tandem_maps::{HashMap, MapError};
///
/// let mut reviews = HashMap::new();
/// reviews.insert("Dune", "classic");
/// reviews.insert("Emma", "witty");
///
/// assert_eq!(reviews.value_of(&"Dune"), Ok(&"classic"));
/// assert_eq!(reviews.remove(&"Ulysses"), Err(MapError::NotFound));
///
/// *reviews.get_or_insert_default("Beloved") = "haunting";
/// assert_eq!(reviews.len(), 3);
/// ```
///
/// Every entry can share a single bucket; the map stays correct, just slower:
///
/// ```
/// use tandem_maps::HashMap;
///
/// let mut map = HashMap::with_buckets(1);
/// map.extend([(3, 'c'), (1, 'a'), (2, 'b')]);
/// assert_eq!(map.bucket_len(0), 3);
/// // A single bucket iterates in insertion order.
/// assert_eq!(map.keys().copied().collect::<Vec<_>>(), [3, 1, 2]);
/// ```
pub struct HashMap<K, V, S = FxBuildHasher> {
    raw: RawHashTable<K, V, S>,
}

/// An iterator over the entries of a `HashMap`.
///
/// This `struct` is created by the [`iter`] method on [`HashMap`].
///
/// [`iter`]: HashMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    entries: Entries<'a, K, V>,
    front: Option<Position>,
    back: Option<Position>,
    remaining: usize,
}

/// A mutable iterator over the entries of a `HashMap`.
///
/// This `struct` is created by the [`iter_mut`] method on [`HashMap`].
///
/// [`iter_mut`]: HashMap::iter_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V> {
    links: &'a BucketLinks<K>,
    values: Vec<Option<&'a mut V>>,
    front: Option<Position>,
    back: Option<Position>,
    remaining: usize,
}

/// An owning iterator over the entries of a `HashMap`.
///
/// This `struct` is created by the [`into_iter`] method on [`HashMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of a `HashMap`.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `HashMap`.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// A mutable iterator over the values of a `HashMap`.
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<K, V> HashMap<K, V, FxBuildHasher> {
    /// Creates an empty `HashMap` with [`DEFAULT_BUCKETS`] buckets.
    ///
    /// The bucket array and its sentinels are allocated immediately.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::hash_map::{HashMap, DEFAULT_BUCKETS};
    ///
    /// let map: HashMap<&str, i32> = HashMap::new();
    /// assert_eq!(map.bucket_count(), DEFAULT_BUCKETS);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_buckets_and_hasher(DEFAULT_BUCKETS, FxBuildHasher)
    }

    /// Creates an empty `HashMap` with `bucket_count` buckets.
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::HashMap;
    ///
    /// let map: HashMap<u64, u64> = HashMap::with_buckets(64);
    /// assert_eq!(map.bucket_count(), 64);
    /// ```
    #[must_use]
    pub fn with_buckets(bucket_count: usize) -> Self {
        Self::with_buckets_and_hasher(bucket_count, FxBuildHasher)
    }
}

impl<K, V, S> HashMap<K, V, S> {
    /// Creates an empty `HashMap` with [`DEFAULT_BUCKETS`] buckets that uses
    /// `hasher` to hash keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::hash::RandomState;
    /// use tandem_maps::HashMap;
    ///
    /// let mut map = HashMap::with_hasher(RandomState::new());
    /// map.insert(1, 2);
    /// assert_eq!(map[&1], 2);
    /// ```
    #[must_use]
    pub fn with_hasher(hasher: S) -> Self {
        Self::with_buckets_and_hasher(DEFAULT_BUCKETS, hasher)
    }

    /// Creates an empty `HashMap` with `bucket_count` buckets that uses `hasher`
    /// to hash keys.
    ///
    /// # Panics
    ///
    /// Panics if `bucket_count` is zero.
    #[must_use]
    pub fn with_buckets_and_hasher(bucket_count: usize, hasher: S) -> Self {
        HashMap {
            raw: RawHashTable::with_buckets_and_hasher(bucket_count, hasher),
        }
    }

    /// Returns the number of elements in the map.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the fixed number of buckets.
    #[must_use]
    pub fn bucket_count(&self) -> usize {
        self.raw.links().bucket_count()
    }

    /// Returns the number of entries chained in bucket `bucket`.
    ///
    /// # Panics
    ///
    /// Panics if `bucket >= self.bucket_count()`.
    #[must_use]
    pub fn bucket_len(&self, bucket: usize) -> usize {
        self.raw.links().bucket_len(bucket)
    }

    /// Returns a reference to the map's [`BuildHasher`].
    #[must_use]
    pub const fn hasher(&self) -> &S {
        self.raw.hasher()
    }

    /// Clears the map, removing all entries. The bucket count is kept.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::HashMap;
    ///
    /// let mut a = HashMap::with_buckets(8);
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// assert_eq!(a.bucket_count(), 8);
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// An iterator visiting all entries in bucket order.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::HashMap;
    ///
    /// let map = HashMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// let mut total = 0;
    /// for (_, value) in map.iter() {
    ///     total += value;
    /// }
    /// assert_eq!(total, 6);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        let links = self.raw.links();
        Iter {
            entries: self.raw.entries(),
            front: links.first(),
            back: links.last(),
            remaining: self.raw.len(),
        }
    }

    /// An iterator visiting all entries in bucket order, with mutable references
    /// to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        let remaining = self.raw.len();
        let (links, values) = self.raw.split_mut();
        IterMut {
            links,
            values,
            front: links.first(),
            back: links.last(),
            remaining,
        }
    }

    /// An iterator visiting all keys in bucket order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// An iterator visiting all values in bucket order.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// An iterator visiting all values mutably in bucket order.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut { inner: self.iter_mut() }
    }

    /// Returns a cursor at the first entry of the lowest non-empty bucket, or at the
    /// end position if the map is empty.
    pub fn cursor_front(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.raw.entries(), self.raw.links().first())
    }

    /// Returns a cursor at the end position.
    ///
    /// The end position does not depend on the contents of any bucket.
    pub fn cursor_end(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.raw.entries(), None)
    }

    /// Returns a mutable cursor at the first entry, or at the end position if the
    /// map is empty.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, K, V, S> {
        let first = self.raw.links().first();
        CursorMut::new(&mut self.raw, first)
    }

    /// Returns a mutable cursor at the end position.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, K, V, S> {
        CursorMut::new(&mut self.raw, None)
    }
}

impl<K, V, S> HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but [`Hash`] and
    /// [`Eq`] on the borrowed form *must* match those for the key type.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.get_mut(key)
    }

    /// Returns a reference to the value corresponding to the key, without inserting.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NotFound`] if the key is absent.
    pub fn value_of<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.get(key).ok_or(MapError::NotFound)
    }

    /// Returns a mutable reference to the value corresponding to the key, without
    /// inserting.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NotFound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::{HashMap, MapError};
    ///
    /// let mut map = HashMap::from([("x", 1)]);
    /// *map.value_of_mut(&"x").unwrap() += 1;
    /// assert_eq!(map[&"x"], 2);
    /// assert_eq!(map.value_of_mut(&"y"), Err(MapError::NotFound));
    /// ```
    pub fn value_of_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.get_mut(key).ok_or(MapError::NotFound)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.search(key).is_some()
    }

    /// Inserts a key-value pair into the map.
    ///
    /// A new key is appended to the end of its bucket. If the key is already
    /// present, its value is replaced in place and the old value returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::HashMap;
    ///
    /// let mut map = HashMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Returns a mutable reference to the value for `key`, appending `V::default()`
    /// to the key's bucket first if the key is absent.
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.raw.get_or_insert_with(key, V::default)
    }

    /// Returns a mutable reference to the value for `key`, appending the result of
    /// `make` first if the key is absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        self.raw.get_or_insert_with(key, make)
    }

    /// Removes a key from the map, returning its value.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NotFound`] if the key is absent; the map is unchanged.
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes a key from the map, returning the stored key and value.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NotFound`] if the key is absent; the map is unchanged.
    pub fn remove_entry<Q>(&mut self, key: &Q) -> Result<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.raw.remove_entry(key).ok_or(MapError::NotFound)
    }

    /// Returns a cursor at `key`, or at the end position if the key is absent.
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        Cursor::new(self.raw.entries(), self.raw.search(key))
    }

    /// Returns a mutable cursor at `key`, or at the end position if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::HashMap;
    ///
    /// let mut map = HashMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.find_mut(&1).remove(), Ok((1, "a")));
    /// assert!(map.find(&1).is_end());
    /// ```
    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V, S>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let found = self.raw.search(key);
        CursorMut::new(&mut self.raw, found)
    }
}

impl<K, V, S> Clone for HashMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    /// Deep-copies the map into a fresh table with the same bucket count and hasher.
    fn clone(&self) -> Self {
        let mut map = HashMap::with_buckets_and_hasher(self.bucket_count(), self.hasher().clone());
        map.extend(self.iter().map(|(k, v)| (k.clone(), v.clone())));
        map
    }

    /// Takes the source's bucket count and hasher, rebuilding the table when the
    /// bucket counts differ.
    fn clone_from(&mut self, source: &Self) {
        if self.bucket_count() != source.bucket_count() {
            *self = source.clone();
            return;
        }
        self.clear();
        self.raw.set_hasher(source.hasher().clone());
        self.extend(source.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

impl<K, V, S> PartialEq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: PartialEq,
    S: BuildHasher,
{
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<K, V, S> Eq for HashMap<K, V, S>
where
    K: Hash + Eq,
    V: Eq,
    S: BuildHasher,
{
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for HashMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, S: Default> Default for HashMap<K, V, S> {
    /// Creates an empty map with [`DEFAULT_BUCKETS`] buckets.
    fn default() -> Self {
        HashMap::with_hasher(S::default())
    }
}

impl<K, V, S> FromIterator<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher + Default,
{
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = HashMap::default();
        map.extend(iter);
        map
    }
}

impl<K, V, S> Extend<(K, V)> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K, V, S> Extend<(&'a K, &'a V)> for HashMap<K, V, S>
where
    K: Hash + Eq + Copy,
    V: Copy,
    S: BuildHasher,
{
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for HashMap<K, V, FxBuildHasher>
where
    K: Hash + Eq,
{
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::HashMap;
    ///
    /// let map1 = HashMap::from([(1, 2), (3, 4)]);
    /// let map2: HashMap<_, _> = [(1, 2), (3, 4)].into();
    /// assert_eq!(map1, map2);
    /// ```
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<'a, K, V, S> IntoIterator for &'a HashMap<K, V, S> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K, V, S> IntoIterator for &'a mut HashMap<K, V, S> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V, S> IntoIterator for HashMap<K, V, S> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<K, Q, V, S> Index<&Q> for HashMap<K, V, S>
where
    K: Borrow<Q> + Hash + Eq,
    Q: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K, V, S> Map<K, V> for HashMap<K, V, S>
where
    K: Hash + Eq,
    S: BuildHasher,
{
    fn len(&self) -> usize {
        self.raw.len()
    }

    fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.raw.get_or_insert_with(key, V::default)
    }

    fn value_of(&self, key: &K) -> Result<&V> {
        self.raw.get(key).ok_or(MapError::NotFound)
    }

    fn value_of_mut(&mut self, key: &K) -> Result<&mut V> {
        self.raw.get_mut(key).ok_or(MapError::NotFound)
    }

    fn contains_key(&self, key: &K) -> bool {
        self.raw.search(key).is_some()
    }

    fn remove(&mut self, key: &K) -> Result<V> {
        self.raw.remove_entry(key).map(|(_, value)| value).ok_or(MapError::NotFound)
    }

    fn clear(&mut self) {
        self.raw.clear();
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let at = self.front?;
        self.front = self.entries.links().next(at);
        self.remaining -= 1;
        Some(self.entries.entry(at))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let at = self.back?;
        self.back = self.entries.links().prev(at);
        self.remaining -= 1;
        Some(self.entries.entry(at))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            entries: self.entries,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K, V> IterMut<'a, K, V> {
    fn yield_at(&mut self, at: Position) -> Option<(&'a K, &'a mut V)> {
        let links: &'a BucketLinks<K> = self.links;
        let (key, value) = links.node(at.node).entry_parts();
        let value = self.values[value.to_index()].take()?;
        Some((key, value))
    }
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let at = self.front?;
        self.front = self.links.next(at);
        self.remaining -= 1;
        self.yield_at(at)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let at = self.back?;
        self.back = self.links.prev(at);
        self.remaining -= 1;
        self.yield_at(at)
    }
}

impl<K, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K, V> FusedIterator for IterMut<'_, K, V> {}

impl<K, V> fmt::Debug for IterMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut").field("remaining", &self.remaining).finish()
    }
}

impl<K, V> Iterator for IntoIter<K, V> {
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for IntoIter<K, V> {
    fn next_back(&mut self) -> Option<(K, V)> {
        self.inner.next_back()
    }
}

impl<K, V> ExactSizeIterator for IntoIter<K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.as_slice()).finish()
    }
}

impl<'a, K, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K, V> ExactSizeIterator for ValuesMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K, V> FusedIterator for ValuesMut<'_, K, V> {}
