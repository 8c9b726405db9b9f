//! Monte-Carlo PageRank: simulate one long random-surfer walk and count visits.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::graph::{GraphRef, LinkGraph};
use crate::transition::transition_row;
use crate::{validate_damping, Error, RankResult, Result};

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplingConfig {
    pub damping: f64,
    pub samples: usize,
    pub seed: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self { damping: 0.85, samples: 10_000, seed: 42 }
    }
}

impl SamplingConfig {
    pub fn validate(&self) -> Result<()> {
        validate_damping(self.damping)?;
        validate_samples(self.samples)
    }
}

fn validate_samples(samples: usize) -> Result<()> {
    if samples < 1 {
        return Err(Error::InvalidParameter("sample count must be >= 1".to_string()));
    }
    Ok(())
}

/// Estimate PageRank from `samples` steps of a random-surfer walk driven by `rng`.
///
/// The walk starts on a page chosen uniformly at random. Each step records a visit to
/// the current page, then draws the next page from the transition distribution.
/// Ranks are `visits / samples`, so they sum to exactly 1.
pub fn sample_pagerank<R: Rng>(
    graph: &LinkGraph,
    damping: f64,
    samples: usize,
    rng: &mut R,
) -> Result<RankResult> {
    let visits = sample_visits(graph, damping, samples, rng)?;
    let total = samples as f64;
    Ok(crate::to_ranks(graph, visits.into_iter().map(|v| v as f64 / total)))
}

/// [`sample_pagerank`] with a `ChaCha8Rng` seeded from `config.seed`.
pub fn sample_pagerank_seeded(graph: &LinkGraph, config: SamplingConfig) -> Result<RankResult> {
    config.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    sample_pagerank(graph, config.damping, config.samples, &mut rng)
}

/// Raw visit counts per node id. The counts sum to exactly `samples`.
pub fn sample_visits<G: GraphRef, R: Rng>(
    graph: &G,
    damping: f64,
    samples: usize,
    rng: &mut R,
) -> Result<Vec<u64>> {
    validate_damping(damping)?;
    validate_samples(samples)?;
    let n = graph.node_count();
    if n == 0 {
        return Err(Error::EmptyCorpus);
    }

    let mut visits = vec![0u64; n];
    let start = rng.random_range(0..n);
    walk_into(graph, start, damping, samples, rng, &mut visits);
    debug!(pages = n, samples, damping, start, "sampled random-surfer walk");
    Ok(visits)
}

/// Deterministic parallel sampling over `chains` independent walks.
///
/// `config.samples` is split as evenly as possible across chains (earlier chains take
/// the remainder) and the visit counts are pooled. Each chain's generator is seeded from
/// `(config.seed, chain)` only.
///
/// Invariant: output is stable for a fixed `seed`, independent of Rayon thread count.
#[cfg(feature = "parallel")]
pub fn sample_pagerank_parallel(
    graph: &LinkGraph,
    config: SamplingConfig,
    chains: usize,
) -> Result<RankResult> {
    use rayon::prelude::*;

    config.validate()?;
    if chains < 1 || chains > config.samples {
        return Err(Error::InvalidParameter(format!(
            "chains must be in [1, samples] (chains={chains} samples={})",
            config.samples
        )));
    }
    let n = graph.len();
    let base = config.samples / chains;
    let extra = config.samples % chains;

    let visits = (0..chains)
        .into_par_iter()
        .map(|chain| {
            let steps = base + usize::from(chain < extra);
            let mut rng = ChaCha8Rng::seed_from_u64(mix64(config.seed ^ chain as u64));
            let mut visits = vec![0u64; n];
            let start = rng.random_range(0..n);
            walk_into(graph, start, config.damping, steps, &mut rng, &mut visits);
            visits
        })
        .reduce(
            || vec![0u64; n],
            |mut acc, v| {
                for (a, b) in acc.iter_mut().zip(v) {
                    *a += b;
                }
                acc
            },
        );

    debug!(pages = n, samples = config.samples, chains, "pooled parallel walks");
    let total = config.samples as f64;
    Ok(crate::to_ranks(graph, visits.into_iter().map(|v| v as f64 / total)))
}

#[cfg(feature = "parallel")]
fn mix64(mut x: u64) -> u64 {
    x ^= x >> 30;
    x = x.wrapping_mul(0xbf58476d1ce4e5b9);
    x ^= x >> 27;
    x = x.wrapping_mul(0x94d049bb133111eb);
    x ^= x >> 31;
    x
}

fn walk_into<G: GraphRef, R: Rng>(
    graph: &G,
    start: usize,
    damping: f64,
    steps: usize,
    rng: &mut R,
    visits: &mut [u64],
) {
    let n = graph.node_count();
    let mut row = vec![0.0; n];
    let mut cdf = vec![0.0; n];
    let mut current = start;
    for _ in 0..steps {
        visits[current] += 1;
        transition_row(graph, current, damping, &mut row);
        current = sample_weighted(&row, &mut cdf, rng);
    }
}

/// Inverse-CDF draw over a probability vector: a uniform `u` in `[0, 1)` selects the
/// first index whose prefix sum exceeds `u`.
///
/// `cdf` is scratch space of the same length as `weights`. When rounding leaves the
/// total just below `u`, the last index with positive weight is returned.
fn sample_weighted<R: Rng>(weights: &[f64], cdf: &mut [f64], rng: &mut R) -> usize {
    let mut acc = 0.0;
    for (c, &w) in cdf.iter_mut().zip(weights) {
        acc += w;
        *c = acc;
    }
    let last = weights
        .iter()
        .rposition(|&w| w > 0.0)
        .unwrap_or(weights.len() - 1);
    let u = rng.random::<f64>();
    cdf.partition_point(|&c| c <= u).min(last)
}
