use crate::Result;

/// The contract shared by [`TreeMap`](crate::TreeMap) and [`HashMap`](crate::HashMap).
///
/// Code written against `Map` runs unchanged on either engine; only iteration order
/// differs (ascending keys for the tree, bucket order for the hash map).
///
/// # Examples
///
/// ```
/// use tandem_maps::{HashMap, Map, MapError, TreeMap};
///
/// fn tally<M: Map<&'static str, u32>>(map: &mut M, words: &[&'static str]) {
///     for word in words {
///         *map.get_or_insert_default(*word) += 1;
///     }
/// }
///
/// let words = ["a", "b", "a"];
/// let mut tree = TreeMap::new();
/// let mut hash = HashMap::new();
/// tally(&mut tree, &words);
/// tally(&mut hash, &words);
///
/// assert_eq!(Map::value_of(&tree, &"a"), Ok(&2));
/// assert_eq!(Map::value_of(&hash, &"a"), Ok(&2));
/// assert_eq!(Map::value_of(&hash, &"z"), Err(MapError::NotFound));
/// ```
pub trait Map<K, V> {
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the map holds no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Inserts a pair, replacing and returning the value of an existing key.
    fn insert(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value for `key`, inserting `V::default()` first if the key is absent.
    fn get_or_insert_default(&mut self, key: K) -> &mut V
    where
        V: Default;

    /// Returns the value for `key`, or [`MapError::NotFound`](crate::MapError::NotFound).
    fn value_of(&self, key: &K) -> Result<&V>;

    /// Returns the value for `key` mutably, or [`MapError::NotFound`](crate::MapError::NotFound).
    fn value_of_mut(&mut self, key: &K) -> Result<&mut V>;

    /// Returns `true` if the map holds `key`.
    fn contains_key(&self, key: &K) -> bool {
        self.value_of(key).is_ok()
    }

    /// Removes `key` and returns its value, or [`MapError::NotFound`](crate::MapError::NotFound).
    fn remove(&mut self, key: &K) -> Result<V>;

    /// Removes every entry.
    fn clear(&mut self);
}
