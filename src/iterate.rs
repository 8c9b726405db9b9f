//! PageRank by power iteration over the random-surfer transition model.

use tracing::{debug, trace};

use crate::graph::{GraphRef, LinkGraph};
use crate::transition::transition_row;
use crate::{validate_damping, Error, RankResult, Result};

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IterateConfig {
    pub damping: f64,
    /// Stop once the L1 change between successive rank vectors drops below this.
    pub tolerance: f64,
    /// Give up with [`Error::DidNotConverge`] after this many rounds.
    pub max_iterations: usize,
}

impl Default for IterateConfig {
    fn default() -> Self {
        Self { damping: 0.85, tolerance: 1e-3, max_iterations: 1_000 }
    }
}

impl IterateConfig {
    pub fn validate(&self) -> Result<()> {
        validate_damping(self.damping)?;
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "tolerance must be finite and > 0 (got {})",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidParameter("max_iterations must be >= 1".to_string()));
        }
        Ok(())
    }
}

/// Outcome of a converged power iteration.
#[derive(Debug, Clone, PartialEq)]
pub struct IterationRun {
    pub ranks: RankResult,
    /// Rounds performed, including the one that met the tolerance.
    pub iterations: usize,
    /// L1 change of the final round.
    pub diff_l1: f64,
}

/// PageRank by power iteration with the default iteration cap.
pub fn iterate_pagerank(graph: &LinkGraph, damping: f64, tolerance: f64) -> Result<RankResult> {
    let config = IterateConfig { damping, tolerance, ..Default::default() };
    iterate_pagerank_run(graph, config).map(|run| run.ranks)
}

/// Power iteration to a fixed point.
///
/// Starts from the uniform vector; each round sets
/// `new[p] = sum_i rank[i] * P(i -> p)` using the full transition row of every page.
/// Stops when `sum_p |new[p] - rank[p]| < tolerance`, keeping `new`, then divides by the
/// total so the result sums to 1.
pub fn iterate_pagerank_run(graph: &LinkGraph, config: IterateConfig) -> Result<IterationRun> {
    config.validate()?;
    let (scores, iterations, diff_l1) = power_iterate(graph, config)?;
    Ok(IterationRun {
        ranks: crate::to_ranks(graph, scores),
        iterations,
        diff_l1,
    })
}

fn power_iterate<G: GraphRef>(graph: &G, config: IterateConfig) -> Result<(Vec<f64>, usize, f64)> {
    let n = graph.node_count();
    if n == 0 {
        return Err(Error::EmptyCorpus);
    }
    let mut scores = vec![1.0 / n as f64; n];
    let mut new_scores = vec![0.0; n];
    let mut row = vec![0.0; n];

    let mut last_diff = f64::INFINITY;
    for iteration in 1..=config.max_iterations {
        new_scores.fill(0.0);
        for (i, &rank) in scores.iter().enumerate() {
            transition_row(graph, i, config.damping, &mut row);
            for (acc, &p) in new_scores.iter_mut().zip(&row) {
                *acc += rank * p;
            }
        }

        let diff: f64 = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(old, new)| (old - new).abs())
            .sum();
        last_diff = diff;
        std::mem::swap(&mut scores, &mut new_scores);
        trace!(iteration, diff, "power iteration round");

        if diff < config.tolerance {
            let sum: f64 = scores.iter().sum();
            for s in &mut scores {
                *s /= sum;
            }
            debug!(pages = n, iterations = iteration, diff, "power iteration converged");
            return Ok((scores, iteration, diff));
        }
    }

    Err(Error::DidNotConverge {
        iterations: config.max_iterations,
        diff_l1: last_diff,
    })
}
