use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cmp::Ordering;
use core::mem;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::TreeNode;

/// Explicit stack for in-order walks; 64 levels covers any AVL tree the arena can hold.
type WalkStack = SmallVec<[Handle; 64]>;

/// The node arena and root of an AVL tree, without the values.
///
/// Everything that navigates or reshapes the tree lives here. Nodes carry no parent
/// links, so ancestors are always rediscovered by comparing keys from `root`.
pub(crate) struct TreeLinks<K> {
    nodes: Arena<TreeNode<K>>,
    root: Option<Handle>,
}

/// The core AVL tree backing `TreeMap`.
pub(crate) struct RawAvlTree<K, V> {
    links: TreeLinks<K>,
    /// Values, kept apart from nodes so that `IterMut` can borrow them independently.
    values: Arena<V>,
    /// Number of key-value pairs in the tree.
    len: usize,
}

impl<K> TreeLinks<K> {
    const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Returns a node by handle.
    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &TreeNode<K> {
        self.nodes.get(handle)
    }

    #[inline]
    fn height(&self, link: Option<Handle>) -> u8 {
        link.map_or(0, |h| self.nodes.get(h).height)
    }

    fn balance_factor(&self, handle: Handle) -> i16 {
        let node = self.nodes.get(handle);
        i16::from(self.height(node.right)) - i16::from(self.height(node.left))
    }

    fn fix_height(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let height = 1 + self.height(node.left).max(self.height(node.right));
        self.nodes.get_mut(handle).height = height;
    }

    fn rotate_right(&mut self, pivot: Handle) -> Handle {
        let top = self.nodes.get(pivot).left.expect("right rotation needs a left child");
        let inner = self.nodes.get(top).right;
        self.nodes.get_mut(pivot).left = inner;
        self.nodes.get_mut(top).right = Some(pivot);
        self.fix_height(pivot);
        self.fix_height(top);
        tracing::trace!(pivot = pivot.to_index(), top = top.to_index(), "avl rotate right");
        top
    }

    fn rotate_left(&mut self, pivot: Handle) -> Handle {
        let top = self.nodes.get(pivot).right.expect("left rotation needs a right child");
        let inner = self.nodes.get(top).left;
        self.nodes.get_mut(pivot).right = inner;
        self.nodes.get_mut(top).left = Some(pivot);
        self.fix_height(pivot);
        self.fix_height(top);
        tracing::trace!(pivot = pivot.to_index(), top = top.to_index(), "avl rotate left");
        top
    }

    /// Restores the height and balance of `handle`, whose children are already
    /// balanced. Returns the new root of the subtree.
    fn rebalance(&mut self, handle: Handle) -> Handle {
        self.fix_height(handle);
        match self.balance_factor(handle) {
            2 => {
                let right = self.nodes.get(handle).right.expect("right-heavy node has a right child");
                if self.balance_factor(right) < 0 {
                    let right = self.rotate_right(right);
                    self.nodes.get_mut(handle).right = Some(right);
                }
                self.rotate_left(handle)
            }
            -2 => {
                let left = self.nodes.get(handle).left.expect("left-heavy node has a left child");
                if self.balance_factor(left) > 0 {
                    let left = self.rotate_left(left);
                    self.nodes.get_mut(handle).left = Some(left);
                }
                self.rotate_right(handle)
            }
            _ => handle,
        }
    }

    /// Returns the leftmost node of the subtree rooted at `handle`.
    pub(crate) fn leftmost(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.nodes.get(handle).left {
            handle = left;
        }
        handle
    }

    /// Returns the rightmost node of the subtree rooted at `handle`.
    pub(crate) fn rightmost(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.nodes.get(handle).right {
            handle = right;
        }
        handle
    }

    /// Returns the node with the smallest key.
    pub(crate) fn first(&self) -> Option<Handle> {
        self.root.map(|root| self.leftmost(root))
    }

    /// Returns the node with the largest key.
    pub(crate) fn last(&self) -> Option<Handle> {
        self.root.map(|root| self.rightmost(root))
    }

    /// Splices the minimum out of the subtree rooted at `handle` and returns the
    /// subtree's new root. The spliced node keeps its stale links.
    fn unlink_min(&mut self, handle: Handle) -> Option<Handle> {
        let node = self.nodes.get(handle);
        match node.left {
            None => node.right,
            Some(left) => {
                let left = self.unlink_min(left);
                self.nodes.get_mut(handle).left = left;
                Some(self.rebalance(handle))
            }
        }
    }

    /// Removes every node and returns the arena to its empty state.
    fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    /// Collects every node handle in ascending key order.
    fn in_order(&self) -> Vec<Handle> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = WalkStack::new();
        let mut current = self.root;

        loop {
            while let Some(handle) = current {
                stack.push(handle);
                current = self.nodes.get(handle).left;
            }
            let Some(handle) = stack.pop() else {
                break;
            };
            order.push(handle);
            current = self.nodes.get(handle).right;
        }

        order
    }
}

impl<K: Ord> TreeLinks<K> {
    /// Finds the node holding `key`.
    pub(crate) fn search<Q>(&self, key: &Q) -> Option<Handle>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let mut current = self.root;
        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(node.key.borrow()) {
                Ordering::Equal => return Some(handle),
                Ordering::Less => node.left,
                Ordering::Greater => node.right,
            };
        }
        None
    }

    /// Returns the node that follows `handle` in key order.
    ///
    /// Without a right subtree the successor is the deepest ancestor we leave
    /// through a left link, found by walking down from the root.
    pub(crate) fn successor(&self, handle: Handle) -> Option<Handle> {
        let node = self.nodes.get(handle);
        if let Some(right) = node.right {
            return Some(self.leftmost(right));
        }

        let mut candidate = None;
        let mut current = self.root;
        while let Some(walked) = current {
            let walked_node = self.nodes.get(walked);
            current = match node.key.cmp(&walked_node.key) {
                Ordering::Less => {
                    candidate = Some(walked);
                    walked_node.left
                }
                Ordering::Greater => walked_node.right,
                Ordering::Equal => break,
            };
        }
        candidate
    }

    /// Returns the node that precedes `handle` in key order.
    pub(crate) fn predecessor(&self, handle: Handle) -> Option<Handle> {
        let node = self.nodes.get(handle);
        if let Some(left) = node.left {
            return Some(self.rightmost(left));
        }

        let mut candidate = None;
        let mut current = self.root;
        while let Some(walked) = current {
            let walked_node = self.nodes.get(walked);
            current = match node.key.cmp(&walked_node.key) {
                Ordering::Greater => {
                    candidate = Some(walked);
                    walked_node.right
                }
                Ordering::Less => walked_node.left,
                Ordering::Equal => break,
            };
        }
        candidate
    }

    /// Detaches `target` from the subtree rooted at `current`, rebalancing on the
    /// way back up, and returns the subtree's new root.
    ///
    /// `target` must be reachable from `current`. Its slot is left allocated.
    fn unlink(&mut self, current: Option<Handle>, target: Handle) -> Option<Handle> {
        let current = current?;

        if current == target {
            let node = self.nodes.get(current);
            let (left, right) = (node.left, node.right);
            let Some(right) = right else {
                return left;
            };

            let successor = self.leftmost(right);
            let rest = self.unlink_min(right);
            let successor_node = self.nodes.get_mut(successor);
            successor_node.left = left;
            successor_node.right = rest;
            return Some(self.rebalance(successor));
        }

        let ordering = self.nodes.get(target).key.cmp(&self.nodes.get(current).key);
        if ordering == Ordering::Less {
            let left = self.nodes.get(current).left;
            let left = self.unlink(left, target);
            self.nodes.get_mut(current).left = left;
        } else {
            let right = self.nodes.get(current).right;
            let right = self.unlink(right, target);
            self.nodes.get_mut(current).right = right;
        }
        Some(self.rebalance(current))
    }
}

/// Where an insertion left the value, and what it displaced.
struct Placed<V> {
    value: Handle,
    displaced: Option<V>,
}

impl<K, V> RawAvlTree<K, V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            links: TreeLinks::new(),
            values: Arena::new(),
            len: 0,
        }
    }

    /// Creates a new tree with room for `capacity` entries.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            links: TreeLinks {
                nodes: Arena::with_capacity(capacity),
                root: None,
            },
            values: Arena::with_capacity(capacity),
            len: 0,
        }
    }

    /// Returns the number of key-value pairs in the tree.
    pub(crate) const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree contains no elements.
    pub(crate) const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the capacity of the tree.
    pub(crate) fn capacity(&self) -> usize {
        self.values.capacity()
    }

    /// Returns the node structure.
    pub(crate) const fn links(&self) -> &TreeLinks<K> {
        &self.links
    }

    /// Returns the node structure alongside one exclusive reference per value slot.
    pub(crate) fn split_mut(&mut self) -> (&TreeLinks<K>, Vec<Option<&mut V>>) {
        (&self.links, self.values.split_mut())
    }

    /// Returns a key and its value by node handle.
    pub(crate) fn entry(&self, handle: Handle) -> (&K, &V) {
        let node = self.links.node(handle);
        (&node.key, self.values.get(node.value))
    }

    /// Returns a key and a mutable reference to its value by node handle.
    pub(crate) fn entry_mut(&mut self, handle: Handle) -> (&K, &mut V) {
        let node = self.links.nodes.get(handle);
        (&node.key, self.values.get_mut(node.value))
    }

    /// Clears all elements from the tree.
    pub(crate) fn clear(&mut self) {
        tracing::trace!(len = self.len, "avl clear");
        self.links.clear();
        self.values.clear();
        self.len = 0;
    }

    /// Drains all key-value pairs in ascending key order.
    pub(crate) fn drain_to_vec(&mut self) -> Vec<(K, V)> {
        let order = self.links.in_order();
        let mut result = Vec::with_capacity(order.len());

        for handle in order {
            let node = self.links.nodes.take(handle);
            result.push((node.key, self.values.take(node.value)));
        }

        debug_assert!(self.links.nodes.is_empty());
        debug_assert!(self.values.is_empty());
        self.clear();
        result
    }
}

impl<K: Ord, V> RawAvlTree<K, V> {
    /// Returns a reference to the value corresponding to the key.
    pub(crate) fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.links.search(key)?;
        Some(self.entry(handle).1)
    }

    /// Returns a mutable reference to the value corresponding to the key.
    pub(crate) fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.links.search(key)?;
        Some(self.entry_mut(handle).1)
    }

    /// Inserts a key-value pair, replacing the value in place if the key is
    /// already present. Returns the replaced value.
    pub(crate) fn insert(&mut self, key: K, value: V) -> Option<V> {
        let root = self.links.root;
        let (root, placed) = self.place(root, key, value);
        self.links.root = Some(root);
        placed.displaced
    }

    /// Returns the value for `key`, inserting `make()` first if the key is absent.
    pub(crate) fn get_or_insert_with<F>(&mut self, key: K, make: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let value = match self.links.search(&key) {
            Some(handle) => self.links.node(handle).value,
            None => {
                let root = self.links.root;
                let (root, placed) = self.place(root, key, make());
                self.links.root = Some(root);
                placed.value
            }
        };
        self.values.get_mut(value)
    }

    /// Recursive insertion below `current`. Returns the new subtree root.
    fn place(&mut self, current: Option<Handle>, key: K, value: V) -> (Handle, Placed<V>) {
        let Some(current) = current else {
            let value = self.values.alloc(value);
            let leaf = self.links.nodes.alloc(TreeNode::leaf(key, value));
            self.len += 1;
            return (
                leaf,
                Placed {
                    value,
                    displaced: None,
                },
            );
        };

        let node = self.links.node(current);
        let (left, right, handle) = (node.left, node.right, node.value);
        match key.cmp(&node.key) {
            Ordering::Equal => {
                let displaced = mem::replace(self.values.get_mut(handle), value);
                (
                    current,
                    Placed {
                        value: handle,
                        displaced: Some(displaced),
                    },
                )
            }
            Ordering::Less => {
                let (left, placed) = self.place(left, key, value);
                self.links.nodes.get_mut(current).left = Some(left);
                (self.links.rebalance(current), placed)
            }
            Ordering::Greater => {
                let (right, placed) = self.place(right, key, value);
                self.links.nodes.get_mut(current).right = Some(right);
                (self.links.rebalance(current), placed)
            }
        }
    }

    /// Removes a key from the tree, returning the stored key and value.
    /// The tree is left untouched when the key is absent.
    pub(crate) fn remove_entry<Q>(&mut self, key: &Q) -> Option<(K, V)>
    where
        K: Borrow<Q>,
        Q: ?Sized + Ord,
    {
        let handle = self.links.search(key)?;
        Some(self.remove_node(handle))
    }

    /// Removes the node at `handle`, which must be live.
    pub(crate) fn remove_node(&mut self, handle: Handle) -> (K, V) {
        let root = self.links.root;
        self.links.root = self.links.unlink(root, handle);
        let node = self.links.nodes.take(handle);
        let value = self.values.take(node.value);
        self.len -= 1;
        tracing::trace!(node = handle.to_index(), len = self.len, "avl remove");
        (node.key, value)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::BTreeMap;

    impl<K: Ord, V> RawAvlTree<K, V> {
        /// Checks BST order, cached heights and balance factors for every node.
        fn assert_invariants(&self) {
            fn check<K: Ord>(links: &TreeLinks<K>, link: Option<Handle>, low: Option<&K>, high: Option<&K>) -> u8 {
                let Some(handle) = link else {
                    return 0;
                };
                let node = links.node(handle);
                if let Some(low) = low {
                    assert!(*low < node.key, "BST order violated on the left bound");
                }
                if let Some(high) = high {
                    assert!(node.key < *high, "BST order violated on the right bound");
                }
                let left = check(links, node.left, low, Some(&node.key));
                let right = check(links, node.right, Some(&node.key), high);
                assert!(left.abs_diff(right) <= 1, "balance factor out of range");
                assert_eq!(node.height, 1 + left.max(right), "stale height");
                node.height
            }

            check(&self.links, self.links.root, None, None);
            assert_eq!(self.links.in_order().len(), self.len);
            assert_eq!(self.values.len(), self.len);
        }

        fn keys_in_order(&self) -> Vec<&K> {
            self.links.in_order().into_iter().map(|h| &self.links.node(h).key).collect()
        }
    }

    #[test]
    fn ascending_inserts_stay_balanced() {
        let mut tree = RawAvlTree::new();
        for i in 0..1_000 {
            assert_eq!(tree.insert(i, i * 2), None);
        }
        tree.assert_invariants();
        // 1000 nodes fit in an AVL tree of height at most 1.44 * log2(1001).
        let root = tree.links.root.unwrap();
        assert!(tree.links.node(root).height <= 14);
    }

    #[test]
    fn each_rotation_case() {
        // right-right, left-left, right-left, left-right
        for keys in [[1, 2, 3], [3, 2, 1], [1, 3, 2], [3, 1, 2]] {
            let mut tree = RawAvlTree::new();
            for key in keys {
                tree.insert(key, ());
            }
            tree.assert_invariants();
            let root = tree.links.root.unwrap();
            assert_eq!(tree.links.node(root).key, 2);
            assert_eq!(tree.links.node(root).height, 2);
        }
    }

    #[test]
    fn duplicate_insert_replaces_in_place() {
        let mut tree = RawAvlTree::new();
        assert_eq!(tree.insert(7, "a"), None);
        assert_eq!(tree.insert(7, "b"), Some("a"));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree.get(&7), Some(&"b"));
        tree.assert_invariants();
    }

    #[test]
    fn get_or_insert_with_only_builds_missing_values() {
        let mut tree = RawAvlTree::new();
        *tree.get_or_insert_with(4, || 10) += 1;
        *tree.get_or_insert_with(4, || unreachable!()) += 1;
        assert_eq!(tree.get(&4), Some(&12));
        assert_eq!(tree.len(), 1);
    }

    #[test]
    fn remove_node_with_two_children_uses_successor() {
        let mut tree = RawAvlTree::new();
        for key in [50, 30, 70, 20, 40, 60, 80, 65] {
            tree.insert(key, key);
        }
        assert_eq!(tree.remove_entry(&50), Some((50, 50)));
        tree.assert_invariants();
        assert_eq!(tree.keys_in_order(), [&20, &30, &40, &60, &65, &70, &80]);
    }

    #[test]
    fn successor_and_predecessor_walk_from_root() {
        let mut tree = RawAvlTree::new();
        for key in [8, 4, 12, 2, 6, 10, 14, 1, 3, 5, 7, 9, 11, 13, 15] {
            tree.insert(key, ());
        }

        let mut forward = Vec::new();
        let mut current = tree.links.first();
        while let Some(handle) = current {
            forward.push(tree.links.node(handle).key);
            current = tree.links.successor(handle);
        }
        assert_eq!(forward, (1..=15).collect::<Vec<_>>());

        let mut backward = Vec::new();
        let mut current = tree.links.last();
        while let Some(handle) = current {
            backward.push(tree.links.node(handle).key);
            current = tree.links.predecessor(handle);
        }
        assert_eq!(backward, (1..=15).rev().collect::<Vec<_>>());
    }

    #[test]
    fn removing_absent_key_changes_nothing() {
        let mut tree = RawAvlTree::new();
        tree.insert(1, 'a');
        tree.insert(2, 'b');
        assert_eq!(tree.remove_entry(&3), None);
        assert_eq!(tree.len(), 2);
        tree.assert_invariants();
    }

    #[test]
    fn drain_empties_tree_in_order() {
        let mut tree = RawAvlTree::new();
        for key in [5, 1, 4, 2, 3] {
            tree.insert(key, key * 10);
        }
        assert_eq!(tree.drain_to_vec(), vec![(1, 10), (2, 20), (3, 30), (4, 40), (5, 50)]);
        assert!(tree.is_empty());
        assert_eq!(tree.links.root, None);
    }

    #[derive(Clone, Debug)]
    enum Operation {
        Insert(i16, u32),
        Remove(i16),
    }

    fn strategy() -> impl Strategy<Value = Operation> {
        prop_oneof![
            3 => (-300i16..300, any::<u32>()).prop_map(|(k, v)| Operation::Insert(k, v)),
            2 => (-300i16..300).prop_map(Operation::Remove),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn invariants_hold_after_every_operation(operations in prop::collection::vec(strategy(), 0..512)) {
            let mut tree = RawAvlTree::new();
            let mut model = BTreeMap::new();

            for operation in operations {
                match operation {
                    Operation::Insert(k, v) => {
                        prop_assert_eq!(tree.insert(k, v), model.insert(k, v));
                    }
                    Operation::Remove(k) => {
                        prop_assert_eq!(tree.remove_entry(&k), model.remove_entry(&k));
                    }
                }
                tree.assert_invariants();
                prop_assert_eq!(tree.len(), model.len());
            }

            let keys: Vec<i16> = tree.keys_in_order().into_iter().copied().collect();
            let expected: Vec<i16> = model.keys().copied().collect();
            prop_assert_eq!(keys, expected);
        }
    }
}
