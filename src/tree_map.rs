use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::iter::FusedIterator;
use core::ops::Index;

use crate::raw::{Handle, RawAvlTree, TreeLinks};
use crate::{Map, MapError, Result};

mod capacity;
mod cursor;

pub use cursor::{Cursor, CursorMut};

/// An ordered map based on an [AVL tree].
///
/// Keys must implement [`Ord`]. Iterators and cursors visit entries in ascending key
/// order. Each step recomputes the neighbouring node by walking down from the root,
/// so a full traversal costs O(n log n).
///
/// It is a logic error for a key to be modified in such a way that the key's ordering
/// relative to any other key changes while it is in the map.
///
/// # Examples
///
/// ```
/// use tandem_maps::{MapError, TreeMap};
///
/// let mut stock = TreeMap::new();
/// stock.insert("pears", 4);
/// stock.insert("apples", 10);
/// *stock.get_or_insert_default("plums") += 3;
///
/// assert_eq!(stock.value_of(&"apples"), Ok(&10));
/// assert_eq!(stock.value_of(&"kiwis"), Err(MapError::NotFound));
///
/// let names: Vec<_> = stock.keys().copied().collect();
/// assert_eq!(names, ["apples", "pears", "plums"]);
/// ```
///
/// A `TreeMap` with a known list of items can be initialized from an array. Later
/// duplicates overwrite earlier ones:
///
/// ```
/// use tandem_maps::TreeMap;
///
/// let map = TreeMap::from([(1, "a"), (2, "b"), (1, "z")]);
/// assert_eq!(map.len(), 2);
/// assert_eq!(map[&1], "z");
/// ```
///
/// [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree
pub struct TreeMap<K, V> {
    raw: RawAvlTree<K, V>,
}

/// An iterator over the entries of a `TreeMap`, in ascending key order.
///
/// This `struct` is created by the [`iter`] method on [`TreeMap`].
///
/// [`iter`]: TreeMap::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a, K, V> {
    tree: &'a RawAvlTree<K, V>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// A mutable iterator over the entries of a `TreeMap`, in ascending key order.
///
/// This `struct` is created by the [`iter_mut`] method on [`TreeMap`].
///
/// [`iter_mut`]: TreeMap::iter_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct IterMut<'a, K, V> {
    links: &'a TreeLinks<K>,
    values: Vec<Option<&'a mut V>>,
    front: Option<Handle>,
    back: Option<Handle>,
    remaining: usize,
}

/// An owning iterator over the entries of a `TreeMap`, sorted by key.
///
/// This `struct` is created by the [`into_iter`] method on [`TreeMap`]
/// (provided by the [`IntoIterator`] trait).
///
/// [`into_iter`]: IntoIterator::into_iter
pub struct IntoIter<K, V> {
    inner: alloc::vec::IntoIter<(K, V)>,
}

/// An iterator over the keys of a `TreeMap`.
///
/// This `struct` is created by the [`keys`] method on [`TreeMap`].
///
/// [`keys`]: TreeMap::keys
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Keys<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// An iterator over the values of a `TreeMap`.
///
/// This `struct` is created by the [`values`] method on [`TreeMap`].
///
/// [`values`]: TreeMap::values
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Values<'a, K, V> {
    inner: Iter<'a, K, V>,
}

/// A mutable iterator over the values of a `TreeMap`.
///
/// This `struct` is created by the [`values_mut`] method on [`TreeMap`].
///
/// [`values_mut`]: TreeMap::values_mut
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ValuesMut<'a, K, V> {
    inner: IterMut<'a, K, V>,
}

impl<K, V> TreeMap<K, V> {
    /// Makes a new, empty `TreeMap`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a");
    /// ```
    #[must_use]
    pub const fn new() -> TreeMap<K, V> {
        TreeMap { raw: RawAvlTree::new() }
    }

    /// Clears the map, removing all elements.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::TreeMap;
    ///
    /// let mut a = TreeMap::new();
    /// a.insert(1, "a");
    /// a.clear();
    /// assert!(a.is_empty());
    /// ```
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::TreeMap;
    ///
    /// let mut a = TreeMap::new();
    /// assert_eq!(a.len(), 0);
    /// a.insert(1, "a");
    /// assert_eq!(a.len(), 1);
    /// ```
    #[must_use]
    pub const fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the map contains no elements.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Gets an iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::TreeMap;
    ///
    /// let map = TreeMap::from([(3, "c"), (2, "b"), (1, "a")]);
    /// let (first_key, first_value) = map.iter().next().unwrap();
    /// assert_eq!((*first_key, *first_value), (1, "a"));
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V> {
        let links = self.raw.links();
        Iter {
            tree: &self.raw,
            front: links.first(),
            back: links.last(),
            remaining: self.raw.len(),
        }
    }

    /// Gets a mutable iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::TreeMap;
    ///
    /// let mut map = TreeMap::from([("a", 1), ("b", 2), ("c", 3)]);
    /// for (key, value) in map.iter_mut() {
    ///     if key != &"a" {
    ///         *value += 10;
    ///     }
    /// }
    /// assert_eq!(map.values().copied().collect::<Vec<_>>(), [1, 12, 13]);
    /// ```
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

    /// Gets an iterator over the keys of the map, in sorted order.
    pub fn keys(&self) -> Keys<'_, K, V> {
        Keys { inner: self.iter() }
    }

    /// Gets an iterator over the values of the map, in order by key.
    pub fn values(&self) -> Values<'_, K, V> {
        Values { inner: self.iter() }
    }

    /// Gets a mutable iterator over the values of the map, in order by key.
    pub fn values_mut(&mut self) -> ValuesMut<'_, K, V> {
        ValuesMut { inner: self.iter_mut() }
    }

    /// Returns a cursor at the entry with the smallest key, or at the end position
    /// if the map is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::TreeMap;
    ///
    /// let empty: TreeMap<i32, i32> = TreeMap::new();
    /// assert_eq!(empty.cursor_front(), empty.cursor_end());
    ///
    /// let map = TreeMap::from([(2, 'b'), (1, 'a')]);
    /// assert_eq!(map.cursor_front().key_value(), Ok((&1, &'a')));
    /// ```
    pub fn cursor_front(&self) -> Cursor<'_, K, V> {
        Cursor::new(&self.raw, self.raw.links().first())
    }

    /// Returns a cursor at the end position, one past the largest key.
    pub fn cursor_end(&self) -> Cursor<'_, K, V> {
        Cursor::new(&self.raw, None)
    }

    /// Returns a mutable cursor at the entry with the smallest key, or at the end
    /// position if the map is empty.
    pub fn cursor_front_mut(&mut self) -> CursorMut<'_, K, V> {
        let first = self.raw.links().first();
        CursorMut::new(&mut self.raw, first)
    }

    /// Returns a mutable cursor at the end position, one past the largest key.
    pub fn cursor_end_mut(&mut self) -> CursorMut<'_, K, V> {
        CursorMut::new(&mut self.raw, None)
    }
}

impl<K: Ord, V> TreeMap<K, V> {
    /// Returns a reference to the value corresponding to the key.
    ///
    /// The key may be any borrowed form of the map's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(&1), Some(&"a"));
    /// assert_eq!(map.get(&2), None);
    /// ```
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key)
    }

    /// Returns a reference to the value corresponding to the key.
    ///
    /// Unlike [`get_or_insert_default`](Self::get_or_insert_default) this never inserts.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NotFound`] if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::{MapError, TreeMap};
    ///
    /// let map = TreeMap::from([(1, "a")]);
    /// assert_eq!(map.value_of(&1), Ok(&"a"));
    /// assert_eq!(map.value_of(&2), Err(MapError::NotFound));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn value_of<Q>(&self, key: &Q) -> Result<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get(key).ok_or(MapError::NotFound)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::NotFound`] if the key is absent.
    pub fn value_of_mut<Q>(&mut self, key: &Q) -> Result<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.get_mut(key).ok_or(MapError::NotFound)
    }

    /// Returns `true` if the map contains a value for the specified key.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        self.raw.links().search(key).is_some()
    }

    /// Returns the first key-value pair in the map, the one with the smallest key.
    pub fn first_key_value(&self) -> Option<(&K, &V)> {
        let first = self.raw.links().first()?;
        Some(self.raw.entry(first))
    }

    /// Returns the last key-value pair in the map, the one with the largest key.
    pub fn last_key_value(&self) -> Option<(&K, &V)> {
        let last = self.raw.links().last()?;
        Some(self.raw.entry(last))
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map already had the key, its value is replaced in place and the old
    /// value is returned; the stored key is kept and the size does not change.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::TreeMap;
    ///
    /// let mut map = TreeMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        self.raw.insert(key, value)
    }

    /// Returns a mutable reference to the value for `key`, inserting `V::default()`
    /// first if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::TreeMap;
    ///
    /// let mut counts: TreeMap<char, u32> = TreeMap::new();
    /// *counts.get_or_insert_default('x') += 1;
    /// *counts.get_or_insert_default('x') += 1;
    /// assert_eq!(counts[&'x'], 2);
    /// assert_eq!(counts.len(), 1);
    /// ```
    pub fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default,
    {
        self.raw.get_or_insert_with(key, V::default)
    }

    /// Returns a mutable reference to the value for `key`, inserting the result of
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
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::{MapError, TreeMap};
    ///
    /// let mut map = TreeMap::from([(1, "a")]);
    /// assert_eq!(map.remove(&1), Ok("a"));
    /// assert_eq!(map.remove(&1), Err(MapError::NotFound));
    /// ```
    pub fn remove<Q>(&mut self, key: &Q) -> Result<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
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
        Q: ?Sized + Ord,
    {
        self.raw.remove_entry(key).ok_or(MapError::NotFound)
    }

    /// Returns a cursor at `key`, or at the end position if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::TreeMap;
    ///
    /// let map = TreeMap::from([(1, "a"), (2, "b")]);
    /// let mut cursor = map.find(&1);
    /// cursor.move_next().unwrap();
    /// assert_eq!(cursor.value(), Ok(&"b"));
    /// assert!(map.find(&9).is_end());
    /// ```
    pub fn find<Q>(&self, key: &Q) -> Cursor<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        Cursor::new(&self.raw, self.raw.links().search(key))
    }

    /// Returns a mutable cursor at `key`, or at the end position if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::TreeMap;
    ///
    /// let mut map = TreeMap::from([(1, "a"), (2, "b")]);
    /// let cursor = map.find_mut(&1);
    /// assert_eq!(cursor.remove(), Ok((1, "a")));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn find_mut<Q>(&mut self, key: &Q) -> CursorMut<'_, K, V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let found = self.raw.links().search(key);
        CursorMut::new(&mut self.raw, found)
    }
}

impl<K: Ord + Clone, V: Clone> Clone for TreeMap<K, V> {
    /// Deep-copies the map by inserting every entry into a fresh tree.
    fn clone(&self) -> Self {
        let mut map = TreeMap::with_capacity(self.len());
        map.extend(self.iter().map(|(k, v)| (k.clone(), v.clone())));
        map
    }

    fn clone_from(&mut self, source: &Self) {
        self.clear();
        self.extend(source.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
}

impl<K: Ord, V: PartialEq> PartialEq for TreeMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().zip(other.iter()).all(|(a, b)| a == b)
    }
}

impl<K: Ord, V: Eq> Eq for TreeMap<K, V> {}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for TreeMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V> Default for TreeMap<K, V> {
    fn default() -> Self {
        TreeMap::new()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for TreeMap<K, V> {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = TreeMap::new();
        map.extend(iter);
        map
    }
}

impl<K: Ord, V> Extend<(K, V)> for TreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (k, v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Ord + Copy, V: Copy> Extend<(&'a K, &'a V)> for TreeMap<K, V> {
    fn extend<T: IntoIterator<Item = (&'a K, &'a V)>>(&mut self, iter: T) {
        for (&k, &v) in iter {
            self.insert(k, v);
        }
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a TreeMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Iter<'a, K, V> {
        self.iter()
    }
}

impl<'a, K: Ord, V> IntoIterator for &'a mut TreeMap<K, V> {
    type Item = (&'a K, &'a mut V);
    type IntoIter = IterMut<'a, K, V>;

    fn into_iter(self) -> IterMut<'a, K, V> {
        self.iter_mut()
    }
}

impl<K, V> IntoIterator for TreeMap<K, V> {
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Gets an owning iterator over the entries of the map, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::TreeMap;
    ///
    /// let map = TreeMap::from([(2, "b"), (1, "a")]);
    /// let mut iter = map.into_iter();
    /// assert_eq!(iter.next(), Some((1, "a")));
    /// assert_eq!(iter.next_back(), Some((2, "b")));
    /// ```
    fn into_iter(mut self) -> IntoIter<K, V> {
        IntoIter {
            inner: self.raw.drain_to_vec().into_iter(),
        }
    }
}

impl<K, Q, V> Index<&Q> for TreeMap<K, V>
where
    K: Borrow<Q> + Ord,
    Q: ?Sized + Ord,
{
    type Output = V;

    /// # Panics
    ///
    /// Panics if the key is not present in the map.
    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("no entry found for key")
    }
}

impl<K: Ord, V, const N: usize> From<[(K, V); N]> for TreeMap<K, V> {
    fn from(arr: [(K, V); N]) -> Self {
        arr.into_iter().collect()
    }
}

impl<K: Ord, V> Map<K, V> for TreeMap<K, V> {
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
        self.raw.links().search(key).is_some()
    }

    fn remove(&mut self, key: &K) -> Result<V> {
        self.raw.remove_entry(key).map(|(_, value)| value).ok_or(MapError::NotFound)
    }

    fn clear(&mut self) {
        self.raw.clear();
    }
}

impl<'a, K: Ord, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.front?;
        self.front = self.tree.links().successor(handle);
        self.remaining -= 1;
        Some(self.tree.entry(handle))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Ord, V> DoubleEndedIterator for Iter<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.back?;
        self.back = self.tree.links().predecessor(handle);
        self.remaining -= 1;
        Some(self.tree.entry(handle))
    }
}

impl<K: Ord, V> ExactSizeIterator for Iter<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K: Ord, V> FusedIterator for Iter<'_, K, V> {}

impl<K, V> Clone for Iter<'_, K, V> {
    fn clone(&self) -> Self {
        Iter {
            tree: self.tree,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}

impl<K: Ord + fmt::Debug, V: fmt::Debug> fmt::Debug for Iter<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

impl<'a, K: Ord, V> IterMut<'a, K, V> {
    fn yield_at(&mut self, handle: Handle) -> Option<(&'a K, &'a mut V)> {
        let links: &'a TreeLinks<K> = self.links;
        let node = links.node(handle);
        let value = self.values[node.value.to_index()].take()?;
        Some((&node.key, value))
    }
}

impl<'a, K: Ord, V> Iterator for IterMut<'a, K, V> {
    type Item = (&'a K, &'a mut V);

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.front?;
        self.front = self.links.successor(handle);
        self.remaining -= 1;
        self.yield_at(handle)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K: Ord, V> DoubleEndedIterator for IterMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let handle = self.back?;
        self.back = self.links.predecessor(handle);
        self.remaining -= 1;
        self.yield_at(handle)
    }
}

impl<K: Ord, V> ExactSizeIterator for IterMut<'_, K, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<K: Ord, V> FusedIterator for IterMut<'_, K, V> {}

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

impl<'a, K: Ord, V> Iterator for Keys<'a, K, V> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        self.inner.next().map(|(k, _)| k)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Ord, V> DoubleEndedIterator for Keys<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(k, _)| k)
    }
}

impl<K: Ord, V> ExactSizeIterator for Keys<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K: Ord, V> FusedIterator for Keys<'_, K, V> {}

impl<K, V> Clone for Keys<'_, K, V> {
    fn clone(&self) -> Self {
        Keys {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K: Ord, V> Iterator for Values<'a, K, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Ord, V> DoubleEndedIterator for Values<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K: Ord, V> ExactSizeIterator for Values<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K: Ord, V> FusedIterator for Values<'_, K, V> {}

impl<K, V> Clone for Values<'_, K, V> {
    fn clone(&self) -> Self {
        Values {
            inner: self.inner.clone(),
        }
    }
}

impl<'a, K: Ord, V> Iterator for ValuesMut<'a, K, V> {
    type Item = &'a mut V;

    fn next(&mut self) -> Option<&'a mut V> {
        self.inner.next().map(|(_, v)| v)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<K: Ord, V> DoubleEndedIterator for ValuesMut<'_, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        self.inner.next_back().map(|(_, v)| v)
    }
}

impl<K: Ord, V> ExactSizeIterator for ValuesMut<'_, K, V> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

impl<K: Ord, V> FusedIterator for ValuesMut<'_, K, V> {}
