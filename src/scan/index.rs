// src/scan/index.rs
// =============================================================================
// This module walks the site and builds the reverse link index.
//
// How it works:
// 1. Find every .html/.htm file under the root (case-insensitive)
// 2. Extract the raw href/src values from each file
// 3. Resolve each value (local path / remote URL / discard)
// 4. Record "reference -> pages that contain it"
//
// The scan is single-threaded. It must finish before probing starts, since
// probing only pays off once every distinct URL is known.
// =============================================================================

use crate::checker::{canonicalize_lenient, extract_references, Reference, Resolver};
use std::collections::{BTreeSet, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

// Maps each normalized reference to the set of pages it was found in
//
// Every key has at least one origin: entries are only ever created by
// `insert`, which always adds one.
#[derive(Debug, Default, Clone)]
pub struct ReferenceIndex {
    entries: HashMap<Reference, BTreeSet<PathBuf>>,
}

impl ReferenceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, reference: Reference, origin: PathBuf) {
        self.entries.entry(reference).or_default().insert(origin);
    }

    /// Pages that contain `reference`, if it was seen at all.
    pub fn origins(&self, reference: &Reference) -> Option<&BTreeSet<PathBuf>> {
        self.entries.get(reference)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn local_paths(&self) -> impl Iterator<Item = &PathBuf> {
        self.entries.keys().filter_map(|reference| match reference {
            Reference::Local(path) => Some(path),
            Reference::Network(_) => None,
        })
    }

    pub fn network_addresses(&self) -> BTreeSet<String> {
        self.entries
            .keys()
            .filter_map(|reference| match reference {
                Reference::Network(url) => Some(url.clone()),
                Reference::Local(_) => None,
            })
            .collect()
    }
}

// Scans `root` recursively and indexes every checkable link
//
// Parameters:
//   root: directory holding the rendered site
//   host: the site's own host (e.g. "example.com"), if links to it
//         should be treated as local files
//
// Unreadable files are logged and skipped; they never abort the scan.
pub fn build_index(root: &Path, host: Option<&str>) -> ReferenceIndex {
    let resolver = Resolver::new(root, host);
    let mut index = ReferenceIndex::new();

    let pages = find_html_files(resolver.root());
    info!(pages = pages.len(), root = %resolver.root().display(), "scanning site");

    for page in pages {
        let content = match fs::read(&page) {
            Ok(bytes) => String::from_utf8_lossy(&bytes).into_owned(),
            Err(e) => {
                warn!(page = %page.display(), error = %e, "skipping unreadable page");
                continue;
            }
        };

        let origin = canonicalize_lenient(&page);
        let raw_links = extract_references(&content);
        debug!(page = %origin.display(), links = raw_links.len(), "extracted links");

        for raw in raw_links {
            match resolver.resolve(&raw, &origin).into_reference() {
                Some(reference) => index.insert(reference, origin.clone()),
                None => debug!(link = %raw, "not checkable, skipped"),
            }
        }
    }

    index
}

// Lists every .html/.htm file under `root`, sorted by path
//
// Symlinks are followed, so linked pages and directories are scanned too.
// Link loops come back from walkdir as errors and are skipped.
fn find_html_files(root: &Path) -> Vec<PathBuf> {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(error = %e, "skipping unreadable directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_file() && is_html(entry.path()))
        .map(|entry| entry.into_path())
        .collect()
}

fn is_html(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}
