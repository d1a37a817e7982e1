use chained_table::{attributes, HashTable};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

// Fixed capacity means chain length grows as len / capacity; bench a few
// load levels to show the degradation.
const LOADS: [(usize, usize); 3] = [(1024, 1024), (128, 1024), (8, 1024)];

fn filled(capacity: usize, n: usize, seed: u64) -> (HashTable, Vec<String>) {
    let mut t = HashTable::new(capacity).unwrap();
    let keys: Vec<_> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        t.insert(k.clone(), attributes! { "i" => i as i64 }).unwrap();
    }
    (t, keys)
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_table_insert");
    for (capacity, n) in LOADS {
        let keys: Vec<_> = lcg(1).take(n).map(key).collect();
        group.bench_with_input(BenchmarkId::from_parameter(capacity), &capacity, |b, &cap| {
            b.iter_batched(
                || HashTable::new(cap).unwrap(),
                |mut t| {
                    for k in &keys {
                        t.insert(k.as_str(), attributes! {}).unwrap();
                    }
                    black_box(t)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_find_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_table_find_hit");
    for (capacity, n) in LOADS {
        let (t, keys) = filled(capacity, n, 7);
        let mut it = keys.iter().cycle();
        group.bench_function(BenchmarkId::from_parameter(capacity), |b| {
            b.iter(|| {
                let k = it.next().unwrap();
                black_box(t.find(k).unwrap());
            })
        });
    }
    group.finish();
}

fn bench_find_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_table_find_miss");
    for (capacity, n) in LOADS {
        let (t, _) = filled(capacity, n, 11);
        let mut miss = lcg(0xdead_beef);
        group.bench_function(BenchmarkId::from_parameter(capacity), |b| {
            b.iter(|| {
                // generate keys unlikely in table
                let k = key(miss.next().unwrap());
                black_box(t.contains(&k));
            })
        });
    }
    group.finish();
}

fn bench_remove_reinsert(c: &mut Criterion) {
    c.bench_function("hash_table_remove_reinsert", |b| {
        let (mut t, keys) = filled(128, 1024, 3);
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            let e = t.remove(k).unwrap();
            let (key, attrs) = e.into_parts();
            t.insert(key, attrs).unwrap();
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_find_hit, bench_find_miss, bench_remove_reinsert
}
criterion_main!(benches);
