use core::fmt;
use core::ptr;

use rustc_hash::FxBuildHasher;

use crate::raw::{BucketLinks, Entries, Position, RawHashTable};
use crate::{MapError, Result};

/// A bidirectional cursor over the entries of a [`HashMap`](super::HashMap).
///
/// The cursor walks buckets in ascending index order and each bucket front to back.
/// Its end position is a single value shared by every bucket, so
/// `cursor_front() == cursor_end()` holds exactly when the map is empty.
///
/// # Examples
///
/// ```
/// use tandem_maps::{HashMap, MapError};
///
/// let map = HashMap::from([(1, "a")]);
/// let mut cursor = map.cursor_front();
/// assert_eq!(cursor.key(), Ok(&1));
/// cursor.move_next().unwrap();
/// assert_eq!(cursor, map.cursor_end());
/// assert_eq!(cursor.value(), Err(MapError::InvalidIterator));
/// ```
pub struct Cursor<'a, K, V> {
    entries: Entries<'a, K, V>,
    at: Option<Position>,
}

/// A bidirectional cursor that can update or remove the entry it points at.
///
/// Created by [`HashMap::find_mut`](super::HashMap::find_mut),
/// [`HashMap::cursor_front_mut`](super::HashMap::cursor_front_mut) and
/// [`HashMap::cursor_end_mut`](super::HashMap::cursor_end_mut).
pub struct CursorMut<'a, K, V, S = FxBuildHasher> {
    table: &'a mut RawHashTable<K, V, S>,
    at: Option<Position>,
}

impl<'a, K, V> Cursor<'a, K, V> {
    pub(super) const fn new(entries: Entries<'a, K, V>, at: Option<Position>) -> Self {
        Cursor { entries, at }
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
        let at = self.at.ok_or(MapError::InvalidIterator)?;
        Ok(self.entries.entry(at))
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

    /// Advances to the next entry of the bucket, else the first entry of the next
    /// non-empty bucket, else the end position.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] if the cursor is already at the end.
    pub fn move_next(&mut self) -> Result<()> {
        self.at = step_next(self.entries.links(), self.at)?;
        Ok(())
    }

    /// Steps back to the previous entry of the bucket, else the last entry of the
    /// previous non-empty bucket. From the end position this reaches the last entry
    /// of the highest non-empty bucket.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] at the first entry, or at the end of an
    /// empty map.
    pub fn move_prev(&mut self) -> Result<()> {
        self.at = Some(step_prev(self.entries.links(), self.at)?);
        Ok(())
    }
}

impl<'a, K, V, S> CursorMut<'a, K, V, S> {
    pub(super) fn new(table: &'a mut RawHashTable<K, V, S>, at: Option<Position>) -> Self {
        CursorMut { table, at }
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
        self.as_cursor().key()
    }

    /// Returns the value under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] at the end position.
    pub fn value(&self) -> Result<&V> {
        self.as_cursor().value()
    }

    /// Returns the key and a mutable reference to the value under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] at the end position.
    pub fn key_value_mut(&mut self) -> Result<(&K, &mut V)> {
        let at = self.at.ok_or(MapError::InvalidIterator)?;
        Ok(self.table.entry_mut(at))
    }

    /// Returns a mutable reference to the value under the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] at the end position.
    ///
    /// # Examples
    ///
    /// ```
    /// use tandem_maps::HashMap;
    ///
    /// let mut map = HashMap::from([("k", 1)]);
    /// *map.find_mut(&"k").value_mut().unwrap() = 7;
    /// assert_eq!(map[&"k"], 7);
    /// ```
    pub fn value_mut(&mut self) -> Result<&mut V> {
        self.key_value_mut().map(|(_, value)| value)
    }

    /// Returns a read-only cursor at the same position.
    pub fn as_cursor(&self) -> Cursor<'_, K, V> {
        Cursor::new(self.table.entries(), self.at)
    }

    /// Advances to the next entry in bucket order, or to the end position.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] if the cursor is already at the end.
    pub fn move_next(&mut self) -> Result<()> {
        self.at = step_next(self.table.links(), self.at)?;
        Ok(())
    }

    /// Steps back to the previous entry in bucket order, or from the end position
    /// to the last entry.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] at the first entry, or at the end of an
    /// empty map.
    pub fn move_prev(&mut self) -> Result<()> {
        self.at = Some(step_prev(self.table.links(), self.at)?);
        Ok(())
    }

    /// Unlinks the entry under the cursor from its bucket and returns it, consuming
    /// the cursor.
    ///
    /// # Errors
    ///
    /// Returns [`MapError::InvalidIterator`] at the end position; the map is unchanged.
    pub fn remove(self) -> Result<(K, V)> {
        let at = self.at.ok_or(MapError::InvalidIterator)?;
        Ok(self.table.remove_at(at))
    }
}

fn step_next<K>(links: &BucketLinks<K>, at: Option<Position>) -> Result<Option<Position>> {
    let at = at.ok_or(MapError::InvalidIterator)?;
    Ok(links.next(at))
}

fn step_prev<K>(links: &BucketLinks<K>, at: Option<Position>) -> Result<Position> {
    let previous = match at {
        Some(at) => links.prev(at),
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
        ptr::eq(self.entries.links(), other.entries.links()) && self.at == other.at
    }
}

impl<K, V> Eq for Cursor<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Cursor<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Cursor").field(&self.key_value().ok()).finish()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, S> fmt::Debug for CursorMut<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CursorMut").field(&self.as_cursor().key_value().ok()).finish()
    }
}
