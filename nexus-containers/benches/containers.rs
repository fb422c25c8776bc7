//! Benchmarks comparing nexus-containers against std collections.
//!
//! Run with: cargo bench
//!
//! DynArray is compared against `Vec`, LinkedSeq against `LinkedList`.

use std::collections::LinkedList;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use nexus_containers::{DynArray, LinkedSeq};

const COUNT: usize = 100_000;

// ============================================================================
// Push Benchmarks (growth from empty)
// ============================================================================

fn bench_push_back(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_back");
    group.throughput(Throughput::Elements(COUNT as u64));

    group.bench_function("DynArray", |b| {
        b.iter(|| {
            let mut arr = DynArray::new();
            for i in 0..COUNT as u64 {
                arr.push_back(black_box(i));
            }
            arr
        });
    });

    group.bench_function("Vec", |b| {
        b.iter(|| {
            let mut vec = Vec::new();
            for i in 0..COUNT as u64 {
                vec.push(black_box(i));
            }
            vec
        });
    });

    group.bench_function("LinkedSeq", |b| {
        b.iter(|| {
            let mut list = LinkedSeq::new();
            for i in 0..COUNT as u64 {
                list.push_back(black_box(i));
            }
            list
        });
    });

    group.bench_function("LinkedList", |b| {
        b.iter(|| {
            let mut list = LinkedList::new();
            for i in 0..COUNT as u64 {
                list.push_back(black_box(i));
            }
            list
        });
    });

    group.finish();
}

// ============================================================================
// Push Benchmarks (pre-reserved, reused via clear)
// ============================================================================

fn bench_push_reserved(c: &mut Criterion) {
    let mut group = c.benchmark_group("push_reserved");
    group.throughput(Throughput::Elements(COUNT as u64));

    // Reserve ONCE; clear keeps the capacity
    let mut arr = DynArray::<u64>::with_capacity(COUNT).unwrap();
    let mut vec = Vec::<u64>::with_capacity(COUNT);

    group.bench_function("DynArray", |b| {
        b.iter(|| {
            for i in 0..COUNT as u64 {
                arr.push_back(black_box(i));
            }
            arr.clear();
        });
    });

    group.bench_function("Vec", |b| {
        b.iter(|| {
            for i in 0..COUNT as u64 {
                vec.push(black_box(i));
            }
            vec.clear();
        });
    });

    group.finish();
}

// ============================================================================
// Front Insert / Erase (element shifting)
// ============================================================================

fn bench_insert_front(c: &mut Criterion) {
    const SMALL: usize = 1_000;

    let mut group = c.benchmark_group("insert_front");
    group.throughput(Throughput::Elements(SMALL as u64));

    group.bench_function("DynArray", |b| {
        b.iter(|| {
            let mut arr = DynArray::new();
            for i in 0..SMALL as u64 {
                black_box(arr.insert(0, i).ok());
            }
            while let Ok(value) = arr.erase(0) {
                black_box(value);
            }
        });
    });

    group.bench_function("Vec", |b| {
        b.iter(|| {
            let mut vec = Vec::new();
            for i in 0..SMALL as u64 {
                vec.insert(0, i);
            }
            while !vec.is_empty() {
                black_box(vec.remove(0));
            }
        });
    });

    group.bench_function("LinkedSeq", |b| {
        b.iter(|| {
            let mut list = LinkedSeq::new();
            for i in 0..SMALL as u64 {
                black_box(list.insert(0, i).ok());
            }
            while let Ok(value) = list.erase(0) {
                black_box(value);
            }
        });
    });

    group.finish();
}

// ============================================================================
// Iteration (sequential access)
// ============================================================================

fn bench_iterate(c: &mut Criterion) {
    let mut group = c.benchmark_group("iterate");
    group.throughput(Throughput::Elements(COUNT as u64));

    let arr: DynArray<u64> = (0..COUNT as u64).collect();
    let vec: Vec<u64> = (0..COUNT as u64).collect();
    let seq: LinkedSeq<u64> = (0..COUNT as u64).collect();
    let list: LinkedList<u64> = (0..COUNT as u64).collect();

    group.bench_function("DynArray", |b| {
        b.iter(|| arr.iter().map(|v| black_box(*v)).sum::<u64>());
    });

    group.bench_function("Vec", |b| {
        b.iter(|| vec.iter().map(|v| black_box(*v)).sum::<u64>());
    });

    group.bench_function("LinkedSeq", |b| {
        b.iter(|| seq.iter().map(|v| black_box(*v)).sum::<u64>());
    });

    group.bench_function("LinkedList", |b| {
        b.iter(|| list.iter().map(|v| black_box(*v)).sum::<u64>());
    });

    group.finish();
}

// ============================================================================
// List Relinking
// ============================================================================

fn bench_sort(c: &mut Criterion) {
    const SMALL: usize = 10_000;

    let mut group = c.benchmark_group("sort");
    group.throughput(Throughput::Elements(SMALL as u64));

    // Pseudo-random values (deterministic for reproducibility)
    let values: Vec<u64> = (0..SMALL as u64).map(|i| (i * 7919) % SMALL as u64).collect();

    group.bench_function("LinkedSeq", |b| {
        b.iter_batched(
            || values.iter().copied().collect::<LinkedSeq<u64>>(),
            |mut list| {
                list.sort();
                list
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.bench_function("Vec", |b| {
        b.iter_batched(
            || values.clone(),
            |mut vec| {
                vec.sort();
                vec
            },
            criterion::BatchSize::LargeInput,
        );
    });

    group.finish();
}

fn bench_splice(c: &mut Criterion) {
    let mut group = c.benchmark_group("splice_middle");

    group.bench_function("LinkedSeq", |b| {
        b.iter_batched(
            || {
                let list: LinkedSeq<u64> = (0..1_000).collect();
                let other: LinkedSeq<u64> = (0..1_000).collect();
                (list, other)
            },
            |(mut list, mut other)| {
                black_box(list.splice(500, &mut other).is_ok());
                list
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.bench_function("LinkedList", |b| {
        b.iter_batched(
            || {
                let list: LinkedList<u64> = (0..1_000).collect();
                let other: LinkedList<u64> = (0..1_000).collect();
                (list, other)
            },
            |(mut list, mut other)| {
                let mut tail = list.split_off(500);
                list.append(&mut other);
                list.append(&mut tail);
                list
            },
            criterion::BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_push_back,
    bench_push_reserved,
    bench_insert_front,
    bench_iterate,
    bench_sort,
    bench_splice,
);
criterion_main!(benches);
