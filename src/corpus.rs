//! Load a [`LinkGraph`] from a directory of HTML pages.

use std::collections::BTreeSet;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::graph::LinkGraph;
use crate::{Error, Result};

static HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).expect("href pattern is valid")
});

/// Every `href="..."` target of an `<a ...>` tag in `contents`.
pub fn parse_links(contents: &str) -> BTreeSet<String> {
    HREF.captures_iter(contents)
        .map(|c| c[1].to_string())
        .collect()
}

/// Read every `*.html` file directly inside `dir` as a page.
///
/// The page id is the file name. Self-links and links to names that are not pages of
/// the corpus are dropped. Symlinks are followed; subdirectories and other files are
/// ignored.
pub fn load_corpus(dir: impl AsRef<Path>) -> Result<LinkGraph> {
    let dir = dir.as_ref();
    let mut pages = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(dir).to_path_buf();
            let msg = e.to_string();
            let source = e.into_io_error().unwrap_or_else(|| io::Error::other(msg));
            Error::Io { source, path }
        })?;
        // Symlinked pages count; `file_type` reports the target with `follow_links`.
        if !entry.file_type().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str() else {
            warn!(path = %entry.path().display(), "skipping file with non-UTF-8 name");
            continue;
        };
        if !name.ends_with(".html") {
            continue;
        }
        let contents = fs::read_to_string(entry.path()).map_err(|source| Error::Io {
            source,
            path: entry.path().to_path_buf(),
        })?;
        pages.push((name.to_string(), parse_links(&contents)));
    }

    let graph = LinkGraph::with_pruned_links(pages)?;
    debug!(
        dir = %dir.display(),
        pages = graph.len(),
        links = graph.link_count(),
        "loaded corpus"
    );
    Ok(graph)
}
