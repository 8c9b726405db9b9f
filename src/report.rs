//! Rendering and ranking utilities.

use std::cmp::Reverse;
use std::collections::BinaryHeap;
use std::fmt::Write;

use ordered_float::NotNan;

use crate::RankResult;

/// A title line followed by `  page: value` lines, sorted by page id, 4 decimals.
pub fn render(title: &str, ranks: &RankResult) -> String {
    let mut out = String::with_capacity(title.len() + 1 + ranks.len() * 24);
    out.push_str(title);
    out.push('\n');
    for (page, value) in ranks {
        // Writing into a String cannot fail.
        let _ = writeln!(out, "  {page}: {value:.4}");
    }
    out
}

/// The `k` highest-ranked pages, best first. Ties go to the smaller page id.
///
/// Non-finite and non-positive scores are skipped.
pub fn top_k(ranks: &RankResult, k: usize) -> Vec<(&str, f64)> {
    if k == 0 || ranks.is_empty() {
        return Vec::new();
    }
    // Min-heap on (score, Reverse(page)): the root is the entry to evict.
    let mut heap = BinaryHeap::with_capacity(k + 1);
    for (page, &score) in ranks {
        if !score.is_finite() || score <= 0.0 {
            continue;
        }
        let Ok(s) = NotNan::new(score) else { continue };
        heap.push(Reverse((s, Reverse(page.as_str()))));
        if heap.len() > k {
            heap.pop();
        }
    }
    let mut results: Vec<(NotNan<f64>, &str)> =
        heap.into_iter().map(|Reverse((s, Reverse(p)))| (s, p)).collect();
    results.sort_unstable_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(b.1)));
    results.into_iter().map(|(s, p)| (p, s.into_inner())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ranks(pairs: &[(&str, f64)]) -> RankResult {
        pairs.iter().map(|&(p, v)| (p.to_string(), v)).collect()
    }

    #[test]
    fn render_sorts_pages_and_rounds() {
        let r = ranks(&[("2.html", 0.42857), ("1.html", 0.2), ("10.html", 0.37143)]);
        let out = render("PageRank Results from Iteration", &r);
        assert_eq!(
            out,
            "PageRank Results from Iteration\n  1.html: 0.2000\n  10.html: 0.3714\n  2.html: 0.4286\n"
        );
    }

    #[test]
    fn top_k_orders_by_score_then_page() {
        let r = ranks(&[
            ("a", 0.1),
            ("b", 0.3),
            ("c", 0.3),
            ("d", f64::NAN),
            ("e", 0.0),
            ("f", 0.2),
        ]);
        assert_eq!(top_k(&r, 3), vec![("b", 0.3), ("c", 0.3), ("f", 0.2)]);
        assert_eq!(top_k(&r, 1), vec![("b", 0.3)]);
        assert_eq!(top_k(&r, 10).len(), 4);
        assert!(top_k(&r, 0).is_empty());
    }
}
