//! Graph adapter trait and the named link graph.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{Error, Result};

/// A directed graph over dense node ids `0..node_count()` that can return **borrowed**
/// out-link slices.
///
/// The estimators only need this view; [`LinkGraph`] adds page names on top.
pub trait GraphRef {
    fn node_count(&self) -> usize;
    fn neighbors_ref(&self, node: usize) -> &[usize];
    fn out_degree(&self, node: usize) -> usize {
        self.neighbors_ref(node).len()
    }
}

/// Immutable directed graph over a finite set of named pages.
///
/// Invariants, enforced at construction:
/// - at least one page;
/// - every link target is itself a page;
/// - no page links to itself;
/// - page ids are sorted, and each out-link list is sorted and deduplicated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkGraph {
    pages: Vec<String>,
    index: HashMap<String, usize>,
    links: Vec<Vec<usize>>,
}

impl LinkGraph {
    /// Build from `(page, out-links)` pairs.
    ///
    /// Self-links are stripped. A link to a name that is not one of the pages is an
    /// [`Error::InvalidGraph`]; an empty page set is [`Error::EmptyCorpus`].
    pub fn new<I, P, L, T>(pages: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::build(stage(pages)?, false)
    }

    /// Like [`LinkGraph::new`], but links leaving the page set are dropped instead of
    /// rejected. This is what a loader wants when documents link outside the corpus.
    pub fn with_pruned_links<I, P, L, T>(pages: I) -> Result<Self>
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::build(stage(pages)?, true)
    }

    fn build(staged: BTreeMap<String, BTreeSet<String>>, prune: bool) -> Result<Self> {
        if staged.is_empty() {
            return Err(Error::EmptyCorpus);
        }
        let pages: Vec<String> = staged.keys().cloned().collect();
        let index: HashMap<String, usize> = pages
            .iter()
            .enumerate()
            .map(|(i, p)| (p.clone(), i))
            .collect();

        let mut links = Vec::with_capacity(pages.len());
        for (page, targets) in &staged {
            let mut out = Vec::with_capacity(targets.len());
            for target in targets {
                if target == page {
                    continue;
                }
                match index.get(target) {
                    Some(&t) => out.push(t),
                    None if prune => {}
                    None => {
                        return Err(Error::InvalidGraph(format!(
                            "page {page:?} links to {target:?}, which is not in the page set"
                        )))
                    }
                }
            }
            // BTreeSet iteration order matches the sorted page index.
            links.push(out);
        }

        Ok(Self {
            pages,
            index,
            links,
        })
    }

    /// Number of pages (always >= 1).
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// Always `false`: construction rejects empty page sets.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Page ids in sorted order; position is the dense node id.
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn index_of(&self, page: &str) -> Option<usize> {
        self.index.get(page).copied()
    }

    /// Outbound targets of `page`, or `None` if it is not a page of this graph.
    pub fn links(&self, page: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let node = self.index_of(page)?;
        Some(self.links[node].iter().map(|&t| self.pages[t].as_str()))
    }

    /// `true` if `node` exists and has no out-links.
    pub fn is_dangling(&self, node: usize) -> bool {
        self.links.get(node).is_some_and(Vec::is_empty)
    }

    pub fn link_count(&self) -> usize {
        self.links.iter().map(Vec::len).sum()
    }
}

impl GraphRef for LinkGraph {
    fn node_count(&self) -> usize {
        self.pages.len()
    }

    fn neighbors_ref(&self, node: usize) -> &[usize] {
        self.links.get(node).map(Vec::as_slice).unwrap_or(&[])
    }
}

fn stage<I, P, L, T>(pages: I) -> Result<BTreeMap<String, BTreeSet<String>>>
where
    I: IntoIterator<Item = (P, L)>,
    P: Into<String>,
    L: IntoIterator<Item = T>,
    T: Into<String>,
{
    let mut staged = BTreeMap::new();
    for (page, targets) in pages {
        let page = page.into();
        let targets: BTreeSet<String> = targets.into_iter().map(Into::into).collect();
        if staged.insert(page.clone(), targets).is_some() {
            return Err(Error::InvalidGraph(format!("duplicate page {page:?}")));
        }
    }
    Ok(staged)
}
