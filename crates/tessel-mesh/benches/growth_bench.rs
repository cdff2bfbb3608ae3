//! Benchmarks for Tessel mesh growth
//!
//! Measures performance of:
//! - A single growth tick at several graph sizes
//! - The weakest-open-edge scan that dominates each tick
//! - Sustained growth from the seed triangle

use std::collections::HashSet;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tessel_mesh::{find_weakest_open_edge, grow, sanitize, Graph};

/// Grow a graph to `vertices` vertices from the seed triangle.
fn grown(vertices: usize) -> Graph<u32> {
    let mut graph = Graph::triangle().expect("triangle seed");
    let mut tick = 0u32;
    while graph.vertex_count() < vertices || graph.in_bootstrap() {
        graph = grow(&graph, Some(tick)).expect("growth tick").graph;
        tick += 1;
    }
    graph
}

/// Benchmark one tick on graphs of increasing size
fn bench_single_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_tick");

    for &size in &[16usize, 256, 1024, 4096] {
        let graph = grown(size);
        group.throughput(Throughput::Elements(1));
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, g| {
            b.iter(|| grow(black_box(g), None).expect("growth tick"))
        });
    }
    group.finish();
}

/// Benchmark the weakest-edge scan
fn bench_weakest_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("weakest_scan");

    for &size in &[256usize, 1024, 4096] {
        let graph = grown(size);
        let excluded = HashSet::new();
        group.throughput(Throughput::Elements(graph.edge_count() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, g| {
            b.iter(|| find_weakest_open_edge(black_box(g).edges(), &excluded))
        });
    }
    group.finish();
}

/// Benchmark repair on an already clean graph (the common exit path)
fn bench_clean_sanitize(c: &mut Criterion) {
    let mut group = c.benchmark_group("clean_sanitize");

    for &size in &[256usize, 1024] {
        let graph = grown(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &graph, |b, g| {
            b.iter(|| sanitize(black_box(g)).expect("repair"))
        });
    }
    group.finish();
}

/// Benchmark growth from scratch
fn bench_sustained_growth(c: &mut Criterion) {
    let mut group = c.benchmark_group("sustained_growth");
    group.sample_size(20);

    for &size in &[128usize, 512] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &n| {
            b.iter(|| grown(black_box(n)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_single_tick,
    bench_weakest_scan,
    bench_clean_sanitize,
    bench_sustained_growth,
);

criterion_main!(benches);
