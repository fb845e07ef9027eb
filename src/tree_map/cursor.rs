use core::fmt;
use core::ptr;

use crate::raw::{Handle, RawAvlTree};
use crate::{MapError, Result};

/// A bidirectional cursor over the entries of a [`TreeMap`](super::TreeMap).
///
/// A cursor is either at an entry or at the end position, one past the largest key.
/// Moving past either boundary fails with [`MapError::InvalidIterator`] and leaves
/// the cursor where it was.
///
/// Cursors compare equal when they point into the same map at the same position.
///
/// # Examples
///
/// ```
/// use tandem_maps::{MapError, TreeMap};
///
/// let map = TreeMap::from([(1, "a"), (2, "b")]);
/// let mut cursor = map.cursor_end();
///
/// cursor.move_prev().unwrap();
/// assert_eq!(cursor.key_value(), Ok((&2, &"b")));
/// cursor.move_prev().unwrap();
/// assert_eq!(cursor, map.cursor_front());
/// assert_eq!(cursor.move_prev(), Err(MapError::InvalidIterator));
/// assert_eq!(cursor.key(), Ok(&1));
/// ```
pub struct Cursor<'a, K, V> {
    tree: &'a RawAvlTree<K, V>,
    at: Option<Handle>,
}

/// A bidirectional cursor that can update or remove the entry it points at.
///
/// Created by [`TreeMap::find_mut`](super::TreeMap::find_mut),
/// [`TreeMap::cursor_front_mut`](super::TreeMap::cursor_front_mut) and
/// [`TreeMap::cursor_end_mut`](super::TreeMap::cursor_end_mut). The cursor holds the
/// map's exclusive borrow, so the map cannot change behind its back.
pub struct CursorMut<'a, K, V> {
    tree: &'a mut RawAvlTree<K, V>,
    at: Option<Handle>,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(super) const fn new(tree: &'a RawAvlTree<K, V>, at: Option<Handle>) -> Self {
        Cursor { tree, at }
    }

    /// Returns `true` if the cursor is at the end position.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.at.is_none()
    }

    /// Returns the key and value under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] at the end position.
    pub fn key_value(&self) -> Result<(&'a K, &'a V)> {
        let handle = self.at.ok_or(MapError::InvalidIterator)?;
        Ok(self.tree.entry(handle))
    }

    /// Returns the key under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] at the end position.
    pub fn key(&self) -> Result<&'a K> {
        self.key_value().map(|(key, _)| key)
    }

    /// Returns the value under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] at the end position.
    pub fn value(&self) -> Result<&'a V> {
        self.key_value().map(|(_, value)| value)
    }
}

impl<K: Ord, V> Cursor<'_, K, V> {
    /// Advances to the entry with the next larger key, or to the end position after
    /// the last entry.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] if the cursor is already at the end.
    pub fn move_next(&mut self) -> Result<()> {
        self.at = step_next(self.tree, self.at)?;
        Ok(())
    }

    /// Steps back to the entry with the next smaller key. From the end position this
    /// reaches the entry with the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] at the first entry, or at the end of an
    /// empty map.
    pub fn move_prev(&mut self) -> Result<()> {
        self.at = Some(step_prev(self.tree, self.at)?);
        Ok(())
    }
}

impl<'a, K, V> CursorMut<'a, K, V> {
    pub(super) fn new(tree: &'a mut RawAvlTree<K, V>, at: Option<Handle>) -> Self {
        CursorMut { tree, at }
    }

    /// Returns `true` if the cursor is at the end position.
    #[must_use]
    pub const fn is_end(&self) -> bool {
        self.at.is_none()
    }

    /// Returns the key under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] at the end position.
    pub fn key(&self) -> Result<&K> {
        let handle = self.at.ok_or(MapError::InvalidIterator)?;
        Ok(self.tree.entry(handle).0)
    }

    /// Returns the value under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] at the end position.
    pub fn value(&self) -> Result<&V> {
        let handle = self.at.ok_or(MapError::InvalidIterator)?;
        Ok(self.tree.entry(handle).1)
    }

    /// Returns the key and a mutable reference to the value under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] at the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::TreeMap;
    ///
    /// let mut map = TreeMap::from([(1, 10)]);
    /// let mut cursor = map.cursor_front_mut();
    /// *cursor.key_value_mut().unwrap().1 += 5;
    /// assert_eq!(map[&1], 15);
    /// ```
    pub fn key_value_mut(&mut self) -> Result<(&K, &mut V)> {
        let handle = self.at.ok_or(MapError::InvalidIterator)?;
        Ok(self.tree.entry_mut(handle))
    }

    /// Returns a mutable reference to the value under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] at the end position.
    pub fn value_mut(&mut self) -> Result<&mut V> {
        self.key_value_mut().map(|(_, value)| value)
    }

    /// Returns a read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, K, V> {
        Cursor::new(&*self.tree, self.at)
    }
}

impl<K: Ord, V> CursorMut<'_, K, V> {
    /// Advances to the entry with the next larger key, or to the end position.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] if the cursor is already at the end.
    pub fn move_next(&mut self) -> Result<()> {
        self.at = step_next(self.tree, self.at)?;
        Ok(())
    }

    /// Steps back to the entry with the next smaller key, or from the end position
    /// to the entry with the largest key.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] at the first entry, or at the end of an
    /// empty map.
    pub fn move_prev(&mut self) -> Result<()> {
        self.at = Some(step_prev(self.tree, self.at)?);
        Ok(())
    }

    /// Removes the entry under the cursor and returns it, consuming the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] at the end position; the map is unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::{MapError, TreeMap};
    ///
    /// let mut map = TreeMap::from([(1, "a"), (2, "b")]);
    /// assert_eq!(map.cursor_end_mut().remove(), Err(MapError::InvalidIterator));
    /// assert_eq!(map.find_mut(&2).remove(), Ok((2, "b")));
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn remove(self) -> Result<(K, V)> {
        let handle = self.at.ok_or(MapError::InvalidIterator)?;
        Ok(self.tree.remove_node(handle))
    }
}

fn step_next<K: Ord, V>(tree: &RawAvlTree<K, V>, at: Option<Handle>) -> Result<Option<Handle>> {
    let handle = at.ok_or(MapError::InvalidIterator)?;
    Ok(tree.links().successor(handle))
}

fn step_prev<K: Ord, V>(tree: &RawAvlTree<K, V>, at: Option<Handle>) -> Result<Handle> {
    let links = tree.links();
    let previous = match at {
        Some(handle) => links.predecessor(handle),
        None => links.last(),
    };
    previous.ok_or(MapError::InvalidIterator)
}

impl<K, V> Clone for Cursor<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for Cursor<'_, K, V> {}

impl<K, V> PartialEq for Cursor<'_, K, V> {
    fn eq(&self, other: &Self) -> bool {
        ptr::eq(self.tree, other.tree) && self.at == other.at
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.key_value().ok()).finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for CursorMut<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.as_cursor().key_value().ok()).finish()
    }
}
