//! Two interchangeable map engines behind one contract.
//!
//! This crate provides [`TreeMap`], an ordered map backed by an AVL tree, and
//! [`HashMap`], an unordered map backed by a fixed array of chained buckets. Both
//! implement the [`Map`] trait and offer the same surface:
//!
//! - [`get_or_insert_default`](TreeMap::get_or_insert_default) - get-or-insert, like `map[key]`
//!   in languages where indexing inserts
//! - [`value_of`](TreeMap::value_of) / [`remove`](TreeMap::remove) - fail with
//!   [`MapError::NotFound`] instead of inserting
//! - [`find`](TreeMap::find) and [`cursor_front`](TreeMap::cursor_front) - bidirectional
//!   cursors with an explicit end position that report [`MapError::InvalidIterator`]
//!   when moved out of range
//! - The usual Rust iterators: `iter`, `iter_mut`, `keys`, `values`, `into_iter`
//!
//! # Example
//!
//! ```
//! use tandem_maps::{MapError, TreeMap};
//!
//! let mut map = TreeMap::from([(2, "b"), (0, "c"), (1, "a")]);
//! assert_eq!(map.value_of(&1), Ok(&"a"));
//! assert_eq!(map.remove(&7), Err(MapError::NotFound));
//!
//! // Cursors walk both ways and stop at an explicit end.
//! let mut cursor = map.find(&1);
//! cursor.move_next().unwrap();
//! assert_eq!(cursor.key(), Ok(&2));
//! cursor.move_next().unwrap();
//! assert!(cursor.is_end());
//! assert_eq!(cursor.move_next(), Err(MapError::InvalidIterator));
//!
//! *map.get_or_insert_default(3) = "d";
//! let keys: Vec<_> = map.keys().copied().collect();
//! assert_eq!(keys, [0, 1, 2, 3]);
//! ```
//!
//! # Implementation
//!
//! Nodes of both engines live in arenas and are addressed by handles. The AVL tree
//! keeps no parent links: cursor steps rediscover ancestors by walking down from
//! the root. Every hash bucket is a doubly linked list framed by two permanent
//! sentinel nodes; the bucket count is chosen at construction (1024 by default)
//! and never changes.

#![cfg_attr(not(test), no_std)]
#![forbid(unsafe_code)]
#![forbid(keyword_idents)]
#![forbid(non_ascii_idents)]
#![forbid(unreachable_pub)]
#![warn(clippy::all)]
#![warn(clippy::cargo)]
#![warn(clippy::pedantic)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

extern crate alloc;

mod error;
mod map;
mod raw;

pub mod hash_map;
pub mod tree_map;

pub use error::{MapError, Result};
pub use hash_map::HashMap;
pub use map::Map;
pub use tree_map::TreeMap;
