mod arena;
mod handle;
mod node;
mod raw_avl_tree;
mod raw_hash_table;

pub(crate) use handle::Handle;
pub(crate) use raw_avl_tree::{RawAvlTree, TreeLinks};
pub(crate) use raw_hash_table::{BucketLinks, Entries, Position, RawHashTable};
