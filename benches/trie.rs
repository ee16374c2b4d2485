//! Trie benchmarks
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --bench trie
//! ```

use cowtrie::Trie;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn build(size: usize) -> (Trie, Vec<String>) {
    let keys: Vec<String> = (0..size).map(|i| format!("key/{:08}", i)).collect();
    let trie = keys
        .iter()
        .enumerate()
        .fold(Trie::new(), |t, (i, k)| t.put(k, i as u64));
    (trie, keys)
}

fn bench_trie(c: &mut Criterion) {
    let mut group = c.benchmark_group("trie");

    for size in [100usize, 1_000, 10_000].iter() {
        let (trie, keys) = build(*size);
        group.throughput(Throughput::Elements(*size as u64));

        group.bench_with_input(BenchmarkId::new("get", size), size, |b, _| {
            b.iter(|| {
                for key in &keys {
                    black_box(trie.get::<u64>(key));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("put_overwrite", size), size, |b, _| {
            b.iter(|| {
                for key in &keys {
                    black_box(trie.put(key, 0u64));
                }
            });
        });

        group.bench_with_input(BenchmarkId::new("remove", size), size, |b, _| {
            b.iter(|| {
                for key in &keys {
                    black_box(trie.remove(key));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_trie);
criterion_main!(benches);
