use std::collections::{BTreeMap, HashMap as StdHashMap};
use std::hash::{BuildHasher, Hasher};

use pretty_assertions::assert_eq;
use proptest::prelude::*;
use tandem_maps::hash_map::DEFAULT_BUCKETS;
use tandem_maps::{HashMap, MapError};

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

fn key_strategy() -> impl Strategy<Value = i64> {
    -2_000i64..2_000i64
}

fn value_strategy() -> impl Strategy<Value = i64> {
    any::<i64>()
}

fn bucket_strategy() -> impl Strategy<Value = usize> {
    prop_oneof![Just(1usize), 2usize..64, Just(DEFAULT_BUCKETS)]
}

/// Hashes every key to the same value, forcing all entries into one bucket.
#[derive(Clone, Copy, Default)]
struct Collide;

struct ConstantHasher;

impl Hasher for ConstantHasher {
    fn finish(&self) -> u64 {
        7
    }

    fn write(&mut self, _bytes: &[u8]) {}
}

impl BuildHasher for Collide {
    type Hasher = ConstantHasher;

    fn build_hasher(&self) -> ConstantHasher {
        ConstantHasher
    }
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum MapOp {
    Insert(i64, i64),
    GetOrInsertDefault(i64),
    Remove(i64),
    RemoveViaCursor(i64),
    ValueOf(i64),
    ContainsKey(i64),
}

fn map_op_strategy() -> impl Strategy<Value = MapOp> {
    prop_oneof![
        5 => (key_strategy(), value_strategy()).prop_map(|(k, v)| MapOp::Insert(k, v)),
        2 => key_strategy().prop_map(MapOp::GetOrInsertDefault),
        3 => key_strategy().prop_map(MapOp::Remove),
        1 => key_strategy().prop_map(MapOp::RemoveViaCursor),
        2 => key_strategy().prop_map(MapOp::ValueOf),
        1 => key_strategy().prop_map(MapOp::ContainsKey),
    ]
}

// ─── Core operations against std's HashMap ───────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both maps and asserts identical
    /// results at every step, for a range of bucket counts.
    #[test]
    fn map_ops_match_std(buckets in bucket_strategy(), ops in proptest::collection::vec(map_op_strategy(), TEST_SIZE)) {
        let mut map: HashMap<i64, i64> = HashMap::with_buckets(buckets);
        let mut oracle: StdHashMap<i64, i64> = StdHashMap::new();

        for op in &ops {
            match op {
                MapOp::Insert(k, v) => {
                    prop_assert_eq!(map.insert(*k, *v), oracle.insert(*k, *v), "insert({}, {})", k, v);
                }
                MapOp::GetOrInsertDefault(k) => {
                    let got = *map.get_or_insert_default(*k);
                    let expected = *oracle.entry(*k).or_default();
                    prop_assert_eq!(got, expected, "get_or_insert_default({})", k);
                }
                MapOp::Remove(k) => {
                    let expected = oracle.remove(k).ok_or(MapError::NotFound);
                    prop_assert_eq!(map.remove(k), expected, "remove({})", k);
                }
                MapOp::RemoveViaCursor(k) => {
                    let expected = oracle.remove_entry(k).ok_or(MapError::InvalidIterator);
                    prop_assert_eq!(map.find_mut(k).remove(), expected, "find_mut({}).remove()", k);
                }
                MapOp::ValueOf(k) => {
                    let expected = oracle.get(k).ok_or(MapError::NotFound);
                    prop_assert_eq!(map.value_of(k), expected, "value_of({})", k);
                }
                MapOp::ContainsKey(k) => {
                    prop_assert_eq!(map.contains_key(k), oracle.contains_key(k), "contains_key({})", k);
                }
            }
            prop_assert_eq!(map.len(), oracle.len());
        }

        let total: usize = (0..map.bucket_count()).map(|b| map.bucket_len(b)).sum();
        prop_assert_eq!(total, map.len());

        let entries: BTreeMap<_, _> = map.iter().collect();
        let expected: BTreeMap<_, _> = oracle.iter().collect();
        prop_assert_eq!(entries, expected);
    }

    /// Every traversal visits each entry once, and backward walks mirror forward ones.
    #[test]
    fn traversals_agree(buckets in bucket_strategy(), entries in proptest::collection::vec((key_strategy(), value_strategy()), 1..TEST_SIZE)) {
        let mut map: HashMap<i64, i64> = HashMap::with_buckets(buckets);
        map.extend(entries.iter().copied());
        let oracle: StdHashMap<i64, i64> = entries.iter().copied().collect();

        let forward: Vec<_> = map.iter().collect();
        prop_assert_eq!(forward.len(), oracle.len());
        for (k, v) in &forward {
            prop_assert_eq!(oracle.get(*k), Some(*v));
        }

        let mut backward: Vec<_> = map.iter().rev().collect();
        backward.reverse();
        prop_assert_eq!(&backward, &forward);

        let mut cursor = map.cursor_end();
        let mut walked = Vec::new();
        while cursor.move_prev().is_ok() {
            walked.push(cursor.key_value().unwrap());
        }
        walked.reverse();
        prop_assert_eq!(&walked, &forward);
        prop_assert_eq!(cursor, map.cursor_front());

        prop_assert!(map.keys().eq(forward.iter().map(|(k, _)| *k)));
        prop_assert!(map.values().eq(forward.iter().map(|(_, v)| *v)));
    }

    /// Owning iteration, `iter_mut` and `values_mut` follow the same order as `iter`.
    #[test]
    fn owning_and_mutable_iteration(entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut map: HashMap<i64, i64> = entries.iter().copied().collect();
        let order: Vec<i64> = map.keys().copied().collect();

        for (k, v) in map.iter_mut() {
            *v = *k;
        }
        for v in map.values_mut().rev() {
            *v += 1;
        }

        let owned: Vec<(i64, i64)> = map.into_iter().collect();
        let expected: Vec<(i64, i64)> = order.into_iter().map(|k| (k, k + 1)).collect();
        prop_assert_eq!(owned, expected);
    }

    /// Equality is independent of bucket count and insertion order.
    #[test]
    fn equality_ignores_layout(entries in proptest::collection::btree_map(key_strategy(), value_strategy(), 0..500), buckets in bucket_strategy()) {
        let a: HashMap<i64, i64> = entries.iter().map(|(k, v)| (*k, *v)).collect();
        let mut b = HashMap::with_buckets(buckets);
        b.extend(entries.iter().rev().map(|(k, v)| (*k, *v)));
        prop_assert_eq!(&a, &a);
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(&b, &a);

        if let Some((k, _)) = entries.iter().next() {
            let mut c = b.clone();
            let bumped = c[k].wrapping_add(1);
            *c.value_of_mut(k).unwrap() = bumped;
            prop_assert_ne!(&a, &c);
            prop_assert_ne!(&c, &a);

            b.remove(k).unwrap();
            prop_assert_ne!(&a, &b);
            prop_assert_ne!(&b, &a);
        }
    }

    /// `clone_from` produces the same layout as `clone`, whatever the target held.
    #[test]
    fn clone_from_matches_clone(
        source_buckets in bucket_strategy(),
        target_buckets in bucket_strategy(),
        entries in proptest::collection::vec((key_strategy(), value_strategy()), 0..500),
        stale in proptest::collection::vec((key_strategy(), value_strategy()), 0..50),
    ) {
        let mut source: HashMap<i64, i64> = HashMap::with_buckets(source_buckets);
        source.extend(entries.iter().copied());
        let mut target: HashMap<i64, i64> = HashMap::with_buckets(target_buckets);
        target.extend(stale.iter().copied());

        let copy = source.clone();
        target.clone_from(&source);

        prop_assert_eq!(target.bucket_count(), copy.bucket_count());
        prop_assert_eq!(target.bucket_count(), source_buckets);
        prop_assert!(target.keys().eq(copy.keys()));
        prop_assert_eq!(&target, &source);
    }

    /// Clones keep the bucket count and are independent of their source.
    #[test]
    fn clone_is_deep(buckets in bucket_strategy(), entries in proptest::collection::vec((key_strategy(), value_strategy()), TEST_SIZE)) {
        let mut map: HashMap<i64, i64> = HashMap::with_buckets(buckets);
        map.extend(entries.iter().copied());
        let copy = map.clone();
        prop_assert_eq!(copy.bucket_count(), buckets);
        prop_assert_eq!(&copy, &map);
        prop_assert!(copy.iter().eq(map.iter()));

        map.clear();
        prop_assert!(map.is_empty());
        prop_assert_eq!(map.bucket_count(), buckets);
        prop_assert!(!copy.is_empty());
    }
}

// ─── Individual behaviors ────────────────────────────────────────────────────

#[test]
fn colliding_keys_keep_their_own_values() {
    let mut map = HashMap::with_hasher(Collide);
    map.insert("left", 1);
    map.insert("right", 2);
    assert_eq!(map.bucket_len(7 % DEFAULT_BUCKETS), 2);

    assert_eq!(map.remove(&"left"), Ok(1));
    assert_eq!(map.value_of(&"right"), Ok(&2));
    assert_eq!(map.value_of(&"left"), Err(MapError::NotFound));
    assert_eq!(map.len(), 1);
}

#[test]
fn single_bucket_keeps_insertion_order() {
    let mut map = HashMap::with_buckets(1);
    for k in [9, 3, 7, 1, 5] {
        map.insert(k, ());
    }
    map.remove(&7).unwrap();
    map.insert(7, ());
    // Replacing a value keeps the entry's place in its bucket.
    map.insert(9, ());
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), [9, 3, 1, 5, 7]);
}

#[test]
fn construction_round_trips_through_iteration() {
    let map = HashMap::from([(0, "c"), (1, "a"), (2, "b")]);
    let entries: BTreeMap<_, _> = map.iter().map(|(k, v)| (*k, *v)).collect();
    assert_eq!(entries, BTreeMap::from([(0, "c"), (1, "a"), (2, "b")]));
}

#[test]
fn later_duplicates_overwrite_earlier_ones() {
    let map = HashMap::from([("k", 1), ("k", 2), ("j", 0), ("k", 3)]);
    assert_eq!(map.len(), 2);
    assert_eq!(map["k"], 3);
}

#[test]
fn begin_equals_end_iff_empty() {
    let mut map = HashMap::new();
    assert_eq!(map.cursor_front(), map.cursor_end());
    map.insert(String::from("x"), 0);
    assert_ne!(map.cursor_front(), map.cursor_end());
    map.clear();
    assert_eq!(map.cursor_front(), map.cursor_end());
}

#[test]
fn cursor_errors_leave_state_alone() {
    let mut map = HashMap::from([(1, 'a'), (2, 'b')]);

    let mut cursor = map.cursor_front();
    let first = *cursor.key().unwrap();
    assert_eq!(cursor.move_prev(), Err(MapError::InvalidIterator));
    assert_eq!(cursor.key(), Ok(&first));

    let mut end = map.cursor_end();
    assert_eq!(end.move_next(), Err(MapError::InvalidIterator));
    assert_eq!(end.value(), Err(MapError::InvalidIterator));

    assert_eq!(map.cursor_end_mut().remove(), Err(MapError::InvalidIterator));
    assert_eq!(map.find_mut(&3).remove(), Err(MapError::InvalidIterator));
    assert_eq!(map.len(), 2);
}

#[test]
fn value_of_does_not_insert() {
    let mut map: HashMap<u8, u8> = HashMap::new();
    assert_eq!(map.value_of(&1), Err(MapError::NotFound));
    assert_eq!(map.value_of_mut(&1), Err(MapError::NotFound));
    assert!(map.is_empty());
}

#[test]
fn take_leaves_source_empty_with_default_buckets() {
    let mut source = HashMap::with_buckets(3);
    source.insert(1, 1);
    let moved = std::mem::take(&mut source);
    assert_eq!(moved.bucket_count(), 3);
    assert!(source.is_empty());
    assert_eq!(source.bucket_count(), DEFAULT_BUCKETS);
}

#[test]
#[should_panic(expected = "bucket_count")]
fn zero_buckets_is_rejected() {
    let _map: HashMap<u8, u8> = HashMap::with_buckets(0);
}

#[test]
fn debug_formats_as_map() {
    let mut map = HashMap::with_buckets_and_hasher(4, Collide);
    map.insert(2, 'b');
    map.insert(1, 'a');
    assert_eq!(format!("{map:?}"), "{2: 'b', 1: 'a'}");
}

#[test]
fn clone_from_into_default_map_takes_source_buckets() {
    let mut source = HashMap::with_buckets(1);
    source.extend([(5, 'e'), (3, 'c'), (4, 'd')]);
    let mut target = HashMap::new();
    target.insert(9, 'z');

    target.clone_from(&source);
    assert_eq!(target.bucket_count(), 1);
    assert_eq!(target.bucket_len(0), 3);
    assert_eq!(target.keys().copied().collect::<Vec<_>>(), [5, 3, 4]);
}

#[test]
fn heavy_load_without_rehash() {
    let mut map: HashMap<u32, u32> = HashMap::with_buckets(16);
    for k in 0..20_000u32 {
        *map.get_or_insert_default(k % 5_000) += 1u32;
    }
    assert_eq!(map.len(), 5_000);
    assert_eq!(map.bucket_count(), 16);
    assert!(map.values().all(|&count| count == 4));
}
