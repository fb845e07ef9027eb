use super::handle::Handle;

/// A node of the AVL tree.
///
/// The value lives in a separate arena and is referenced by handle, which keeps
/// node links readable while a mutable iterator holds `&mut V` borrows.
pub(crate) struct TreeNode<K> {
    pub(crate) key: K,
    pub(crate) value: Handle,
    pub(crate) left: Option<Handle>,
    pub(crate) right: Option<Handle>,
    // Height of the subtree rooted here; a leaf has height 1.
    pub(crate) height: u8,
}

impl<K> TreeNode<K> {
    pub(crate) const fn leaf(key: K, value: Handle) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        }
    }
}

/// What a bucket-list node carries.
pub(crate) enum Slot<K> {
    /// One of the two permanent boundary markers of a bucket.
    Sentinel,
    /// A live entry; `value` is a handle into the table's value arena.
    Entry { key: K, value: Handle },
}

/// A node of a bucket's doubly linked list.
pub(crate) struct ListNode<K> {
    pub(crate) slot: Slot<K>,
    pub(crate) prev: Option<Handle>,
    pub(crate) next: Option<Handle>,
}

impl<K> ListNode<K> {
    pub(crate) const fn sentinel() -> Self {
        Self {
            slot: Slot::Sentinel,
            prev: None,
            next: None,
        }
    }

    pub(crate) const fn entry(key: K, value: Handle, prev: Handle, next: Handle) -> Self {
        Self {
            slot: Slot::Entry { key, value },
            prev: Some(prev),
            next: Some(next),
        }
    }

    pub(crate) const fn is_sentinel(&self) -> bool {
        matches!(self.slot, Slot::Sentinel)
    }

    /// Returns the key and value handle of an entry node.
    ///
    /// # Panics
    ///
    /// Panics on a sentinel; callers only reach sentinels through a bucket's
    /// `head`/`tail`, never through a lookup.
    pub(crate) fn entry_parts(&self) -> (&K, Handle) {
        match &self.slot {
            Slot::Entry { key, value } => (key, *value),
            Slot::Sentinel => panic!("expected entry node, found sentinel"),
        }
    }

    /// Returns the key of an entry node, or `None` for a sentinel.
    pub(crate) fn key(&self) -> Option<&K> {
        match &self.slot {
            Slot::Entry { key, .. } => Some(key),
            Slot::Sentinel => None,
        }
    }
}
