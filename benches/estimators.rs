//! Benchmarks for the sampling and iterative estimators.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use rand::SeedableRng;
use std::hint::black_box;
use surfrank::{iterate_pagerank_run, sample_pagerank_seeded, IterateConfig, LinkGraph, SamplingConfig};

fn named(adj: Vec<Vec<usize>>) -> LinkGraph {
    LinkGraph::new(adj.into_iter().enumerate().map(|(i, nbrs)| {
        (
            format!("{i:06}.html"),
            nbrs.into_iter().map(|j| format!("{j:06}.html")).collect::<Vec<_>>(),
        )
    }))
    .expect("generated graph is valid")
}

/// Directed ring: i -> i+1.
fn ring(n: usize) -> LinkGraph {
    named((0..n).map(|i| vec![(i + 1) % n]).collect())
}

/// Web-like directed graph: each page links to `out` targets skewed toward low ids,
/// so a handful of early pages collect most of the in-links. Every tenth page is
/// dangling.
fn skewed_web(n: usize, out: usize, seed: u64) -> LinkGraph {
    let mut rng = StdRng::seed_from_u64(seed);
    let adj = (0..n)
        .map(|page| {
            if page % 10 == 9 {
                return Vec::new();
            }
            (0..out)
                .map(|_| {
                    let u: f64 = rng.random();
                    ((u * u * u) * n as f64) as usize % n
                })
                .collect()
        })
        .collect();
    named(adj)
}

fn bench_estimators(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimators");

    for n in [100usize, 400] {
        let graphs = [("ring", ring(n)), ("skewed_web", skewed_web(n, 6, 123))];

        let sampling = SamplingConfig { samples: 10_000, ..Default::default() };
        let iterate = IterateConfig::default();

        for (name, g) in graphs {
            group.bench_with_input(BenchmarkId::new(format!("{name}/sample"), n), &n, |b, _| {
                b.iter(|| {
                    let ranks = sample_pagerank_seeded(black_box(&g), black_box(sampling));
                    black_box(ranks)
                })
            });

            group.bench_with_input(BenchmarkId::new(format!("{name}/iterate"), n), &n, |b, _| {
                b.iter(|| {
                    let run = iterate_pagerank_run(black_box(&g), black_box(iterate));
                    black_box(run)
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_estimators);
criterion_main!(benches);
