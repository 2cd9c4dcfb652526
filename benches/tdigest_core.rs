//! Criterion benchmarks for core t-digest operations.
//!
//! Stable run tips:
//!   export RUSTFLAGS="-C target-cpu=native"
//!   export RAYON_NUM_THREADS=8       # or 1 for max stability
//!
//! Discover benches:
//!   cargo bench --bench tdigest_core -- --list
//!
//! Save a baseline, then compare a group against it later:
//!   cargo bench --bench tdigest_core -- --save-baseline core_base
//!   cargo bench --bench tdigest_core -- --baseline core_base "quantile"

use std::hint::black_box;
use std::sync::Once;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tdigest_core::tdigest::TDigestF32;
use tdigest_testdata::{gen_dataset_f32, DistKind};

const SIZES: [usize; 4] = [10, 100, 1_000, 10_000];
const UNIFORM: DistKind = DistKind::Uniform { scale: 1000.0 };

/* ------------------------ RAYON INIT (once) ------------------------ */

static RAYON_INIT: Once = Once::new();

fn init_rayon() {
    RAYON_INIT.call_once(|| {
        let builder = match std::env::var("RAYON_NUM_THREADS")
            .ok()
            .and_then(|s| s.parse::<usize>().ok())
        {
            Some(n) => ThreadPoolBuilder::new().num_threads(n),
            None => ThreadPoolBuilder::new(),
        };
        let _ = builder.build_global(); // ignore Err if already built
    });
}

/* ------------------------ BUILD HELPERS ------------------------ */

/// `size` uniform samples compressed to `size` centroids.
fn build_digest(size: usize, seed: u64) -> TDigestF32 {
    let mut d = TDigestF32::new();
    d.insert_many(&gen_dataset_f32(UNIFORM, size, seed))
        .expect("finite samples");
    d.compress(size);
    d
}

/* ------------------- BENCH: INSERT + COMPRESS ---------------------- */

fn bench_insert_compress(c: &mut Criterion) {
    let mut g = c.benchmark_group("insert_compress");
    for size in SIZES {
        let stream = gen_dataset_f32(UNIFORM, 4_096, size as u64);
        g.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut d = TDigestF32::new();
            let mut i = 0usize;
            b.iter(|| {
                d.insert(black_box(stream[i % stream.len()]), 1.0)
                    .expect("finite sample");
                if d.centroids().len() > size {
                    d.compress(size);
                }
                i += 1;
            });
        });
    }
    g.finish();
}

/* -------------------- BENCH: MERGE + COMPRESS ---------------------- */

fn bench_merge_compress(c: &mut Criterion) {
    let mut g = c.benchmark_group("merge_compress");
    for size in SIZES {
        let other = build_digest(size, 7);
        g.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut d = TDigestF32::new();
            b.iter(|| {
                d.merge(black_box(&other));
                d.compress(size);
            });
        });
    }
    g.finish();
}

/* ------------------------ BENCH: QUANTILE -------------------------- */

fn bench_quantile(c: &mut Criterion) {
    let mut g = c.benchmark_group("quantile");
    for size in SIZES {
        let td = build_digest(size, 123);
        for q in [0.25_f32, 0.5, 0.75, 0.99] {
            let id = BenchmarkId::new(format!("size={size}"), format!("q={q:.2}"));
            g.bench_function(id, |b| b.iter(|| black_box(td.quantile(black_box(q)))));
        }
    }
    g.finish();

    // Batched (1000 qs)
    let td = build_digest(10_000, 321);
    let qs: Vec<f32> = (1..1000).map(|i| i as f32 / 1000.0).collect();
    let mut g_batch = c.benchmark_group("quantile/batch_1000");
    g_batch.throughput(Throughput::Elements(qs.len() as u64));
    g_batch.bench_function("grid", |b| b.iter(|| black_box(td.quantiles(black_box(&qs)))));
    g_batch.finish();
}

/* ------------------------ BENCH: FAN-IN --------------------------- */

fn bench_fan_in(c: &mut Criterion) {
    init_rayon();

    let data = gen_dataset_f32(DistKind::NormalModes { modes: 4 }, 1_000_000, 42);
    let mut g = c.benchmark_group("fan_in");
    g.throughput(Throughput::Elements(data.len() as u64));
    g.sample_size(20);
    for workers in [4usize, 16] {
        let chunk = data.len().div_ceil(workers);
        g.bench_with_input(BenchmarkId::from_parameter(workers), &chunk, |b, &chunk| {
            b.iter(|| {
                let parts: Vec<TDigestF32> = data
                    .par_chunks(chunk)
                    .map(|xs| {
                        let mut d = TDigestF32::builder().capacity(xs.len()).build();
                        d.insert_many(xs).expect("finite samples");
                        d.compress(100);
                        d
                    })
                    .collect();
                let mut merged = TDigestF32::merge_digests(parts);
                merged.compress(100);
                black_box(merged)
            });
        });
    }
    g.finish();
}

criterion_group!(
    benches,
    bench_insert_compress,
    bench_merge_compress,
    bench_quantile,
    bench_fan_in
);
criterion_main!(benches);
