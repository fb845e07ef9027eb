use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use std::collections::{BTreeMap, HashMap as StdHashMap};
use tandem_maps::{HashMap, Map, TreeMap};

/// Element counts for the get-or-insert workload.
const SIZES: [u64; 16] = [
    10, 30, 60, 100, 200, 300, 600, 1_000, 2_000, 3_000, 6_000, 10_000, 30_000, 60_000, 100_000, 200_000,
];

/// Element count for the lookup and removal groups.
const N: u64 = 10_000;

// ─── Helper functions to generate key sequences ─────────────────────────────

/// `n` deterministic pseudo-random `(key, value)` pairs drawn from `0..=n`.
fn random_pairs(n: u64) -> Vec<(u64, u64)> {
    // Simple LCG for a reproducible sequence
    let mut pairs = Vec::with_capacity(usize::try_from(n).unwrap_or_default());
    let mut x: u64 = 12345;
    let mut draw = || {
        x = x.wrapping_mul(6_364_136_223_846_793_005).wrapping_add(1);
        (x >> 33) % (n + 1)
    };
    for _ in 0..n {
        let key = draw();
        let value = draw();
        pairs.push((key, value));
    }
    pairs
}

fn fill<M: Map<u64, u64>>(mut map: M, pairs: &[(u64, u64)]) -> M {
    for &(key, value) in pairs {
        *map.get_or_insert_default(key) = value;
    }
    map
}

// ─── Get-or-insert workload ─────────────────────────────────────────────────

fn bench_get_or_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("get_or_insert_default");
    group.sample_size(20);

    for n in SIZES {
        let pairs = random_pairs(n);

        group.bench_with_input(BenchmarkId::new("TreeMap", n), &pairs, |b, pairs| {
            b.iter(|| fill(TreeMap::new(), pairs));
        });

        group.bench_with_input(BenchmarkId::new("HashMap", n), &pairs, |b, pairs| {
            b.iter(|| fill(HashMap::new(), pairs));
        });

        group.bench_with_input(BenchmarkId::new("std::BTreeMap", n), &pairs, |b, pairs| {
            b.iter(|| {
                let mut map = BTreeMap::new();
                for &(key, value) in pairs {
                    *map.entry(key).or_default() = value;
                }
                map
            });
        });

        group.bench_with_input(BenchmarkId::new("std::HashMap", n), &pairs, |b, pairs| {
            b.iter(|| {
                let mut map = StdHashMap::new();
                for &(key, value) in pairs {
                    *map.entry(key).or_default() = value;
                }
                map
            });
        });
    }

    group.finish();
}

// ─── Lookup ─────────────────────────────────────────────────────────────────

fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("value_of");
    let pairs = random_pairs(N);

    let tree = fill(TreeMap::new(), &pairs);
    group.bench_function(BenchmarkId::new("TreeMap", N), |b| {
        b.iter(|| pairs.iter().filter(|(key, _)| tree.value_of(black_box(key)).is_ok()).count());
    });

    let hash = fill(HashMap::new(), &pairs);
    group.bench_function(BenchmarkId::new("HashMap", N), |b| {
        b.iter(|| pairs.iter().filter(|(key, _)| hash.value_of(black_box(key)).is_ok()).count());
    });

    let btree: BTreeMap<u64, u64> = pairs.iter().copied().collect();
    group.bench_function(BenchmarkId::new("std::BTreeMap", N), |b| {
        b.iter(|| pairs.iter().filter(|(key, _)| btree.get(black_box(key)).is_some()).count());
    });

    let std_hash: StdHashMap<u64, u64> = pairs.iter().copied().collect();
    group.bench_function(BenchmarkId::new("std::HashMap", N), |b| {
        b.iter(|| pairs.iter().filter(|(key, _)| std_hash.get(black_box(key)).is_some()).count());
    });

    group.finish();
}

// ─── Removal ────────────────────────────────────────────────────────────────

fn bench_remove(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove");
    let pairs = random_pairs(N);

    let tree = fill(TreeMap::new(), &pairs);
    group.bench_function(BenchmarkId::new("TreeMap", N), |b| {
        b.iter_batched(
            || tree.clone(),
            |mut map| {
                for (key, _) in &pairs {
                    let _ = map.remove(key);
                }
                map
            },
            criterion::BatchSize::LargeInput,
        );
    });

    let hash = fill(HashMap::new(), &pairs);
    group.bench_function(BenchmarkId::new("HashMap", N), |b| {
        b.iter_batched(
            || hash.clone(),
            |mut map| {
                for (key, _) in &pairs {
                    let _ = map.remove(key);
                }
                map
            },
            criterion::BatchSize::LargeInput,
        );
    });

    let btree: BTreeMap<u64, u64> = pairs.iter().copied().collect();
    group.bench_function(BenchmarkId::new("std::BTreeMap", N), |b| {
        b.iter_batched(
            || btree.clone(),
            |mut map| {
                for (key, _) in &pairs {
                    map.remove(key);
                }
                map
            },
            criterion::BatchSize::LargeInput,
        );
    });

    let std_hash: StdHashMap<u64, u64> = pairs.iter().copied().collect();
    group.bench_function(BenchmarkId::new("std::HashMap", N), |b| {
        b.iter_batched(
            || std_hash.clone(),
            |mut map| {
                for (key, _) in &pairs {
                    map.remove(key);
                }
                map
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_get_or_insert, bench_lookup, bench_remove);
criterion_main!(benches);
