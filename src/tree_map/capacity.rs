use super::TreeMap;
use crate::raw::RawAvlTree;

impl<K, V> TreeMap<K, V> {
    /// Creates an empty map with room for at least `capacity` entries before the
    /// node arena reallocates.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::TreeMap;
    ///
    /// let map: TreeMap<i32, i32> = TreeMap::with_capacity(32);
    /// assert!(map.is_empty());
    /// assert!(map.capacity() >= 32);
    /// ```
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TreeMap {
            raw: RawAvlTree::with_capacity(capacity),
        }
    }

    /// Returns how many entries the map can hold without reallocating.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
