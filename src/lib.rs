//! # surfrank
//!
//! Random-surfer PageRank over a directed link graph, estimated two independent ways:
//!
//! - [`sample_pagerank`]: a Monte-Carlo walk that tabulates visit frequencies.
//! - [`iterate_pagerank`]: deterministic power iteration to a fixed point.
//!
//! Both consume the same one-step model ([`distribution`]), so for a fixed graph and
//! damping factor they approximate the same stationary distribution.
//!
//! Public invariants:
//! - **Row-stochastic transitions**: every transition distribution sums to 1, including
//!   for dangling pages (which teleport uniformly).
//! - **Complete results**: every [`RankResult`] has exactly one entry per page.
//! - **Determinism**: iteration is deterministic given identical inputs; sampling is
//!   deterministic given an identically seeded random source.
//! - **No ambient state**: damping, sample counts and random sources are passed in.

use std::collections::BTreeMap;
use std::path::PathBuf;

pub mod corpus;
pub mod graph;
pub mod iterate;
pub mod report;
pub mod sampling;
pub mod transition;

pub use corpus::{load_corpus, parse_links};
pub use graph::{GraphRef, LinkGraph};
pub use iterate::{iterate_pagerank, iterate_pagerank_run, IterateConfig, IterationRun};
pub use report::{render, top_k};
#[cfg(feature = "parallel")]
pub use sampling::sample_pagerank_parallel;
pub use sampling::{sample_pagerank, sample_pagerank_seeded, sample_visits, SamplingConfig};
pub use transition::{distribution, transition_row};

/// Probability mass per page, keyed by page id.
pub type Distribution = BTreeMap<String, f64>;

/// A [`Distribution`] produced by an estimator; every page of the graph is a key.
pub type RankResult = Distribution;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid graph: {0}")]
    InvalidGraph(String),
    #[error("invalid graph: corpus contains no pages")]
    EmptyCorpus,
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("did not converge after {iterations} iterations (last L1 change {diff_l1:e})")]
    DidNotConverge { iterations: usize, diff_l1: f64 },
    #[error("I/O error on {}", path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },
}

pub type Result<T> = std::result::Result<T, Error>;

pub(crate) fn validate_damping(damping: f64) -> Result<()> {
    if !damping.is_finite() || !(0.0..=1.0).contains(&damping) {
        return Err(Error::InvalidParameter(format!(
            "damping must be in [0, 1] (got {damping})"
        )));
    }
    Ok(())
}

/// Pair dense per-node values with page ids.
pub(crate) fn to_ranks(graph: &LinkGraph, values: impl IntoIterator<Item = f64>) -> RankResult {
    graph
        .pages()
        .iter()
        .cloned()
        .zip(values)
        .collect()
}
