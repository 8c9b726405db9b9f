//! Random-surfer transition model.
//!
//! With probability `damping` the surfer follows one of the current page's out-links,
//! chosen uniformly; otherwise it teleports to any page uniformly. A dangling page
//! (no out-links) always teleports uniformly, which keeps every row stochastic.

use crate::graph::{GraphRef, LinkGraph};
use crate::{validate_damping, Distribution, Error, Result};

/// One-step distribution over the next page, given the surfer is on `page`.
///
/// Fails with [`Error::InvalidParameter`] if `page` is not in `graph` or `damping` is
/// outside `[0, 1]`.
pub fn distribution(graph: &LinkGraph, page: &str, damping: f64) -> Result<Distribution> {
    validate_damping(damping)?;
    let node = graph
        .index_of(page)
        .ok_or_else(|| Error::InvalidParameter(format!("unknown page {page:?}")))?;
    let mut row = vec![0.0; graph.len()];
    transition_row(graph, node, damping, &mut row);
    Ok(crate::to_ranks(graph, row))
}

/// Write row `node` of the transition matrix into `out` (dense, indexed by node id).
///
/// Requirements (unchecked):
/// - `node < graph.node_count()`
/// - `out.len() == graph.node_count()`
/// - `damping` in `[0, 1]`
pub fn transition_row<G: GraphRef>(graph: &G, node: usize, damping: f64, out: &mut [f64]) {
    let n = graph.node_count();
    debug_assert_eq!(out.len(), n);
    let links = graph.neighbors_ref(node);
    if links.is_empty() {
        out.fill(1.0 / n as f64);
        return;
    }
    out.fill((1.0 - damping) / n as f64);
    let share = damping / links.len() as f64;
    for &target in links {
        out[target] += share;
    }
}
