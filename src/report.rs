// src/report.rs
// =============================================================================
// Puts the broken references back together with the pages that use them.
// =============================================================================

use crate::checker::Reference;
use crate::ignore::IgnoreSet;
use crate::scan::ReferenceIndex;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

/// One broken reference and every page that links to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BrokenLink {
    #[serde(flatten)]
    pub reference: Reference,
    pub pages: BTreeSet<PathBuf>,
}

/// The broken subset of the index, minus anything ignored.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BrokenReport {
    entries: BTreeMap<Reference, BTreeSet<PathBuf>>,
}

impl BrokenReport {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn pages(&self, reference: &Reference) -> Option<&BTreeSet<PathBuf>> {
        self.entries.get(reference)
    }

    #[cfg(test)]
    pub fn contains(&self, reference: &Reference) -> bool {
        self.entries.contains_key(reference)
    }

    /// Entries sorted by reference (local paths first, then URLs).
    pub fn links(&self) -> Vec<BrokenLink> {
        self.entries
            .iter()
            .map(|(reference, pages)| BrokenLink {
                reference: reference.clone(),
                pages: pages.clone(),
            })
            .collect()
    }
}

// Serialized as a plain array of entries; JSON object keys can't be enums
impl Serialize for BrokenReport {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.links().serialize(serializer)
    }
}

impl fmt::Display for BrokenReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (reference, pages) in &self.entries {
            writeln!(f, "- '{reference}' was found in the following pages:")?;
            for page in pages {
                writeln!(f, "  - `{}`", page.display())?;
            }
        }
        Ok(())
    }
}

// Builds the final report
//
// Report keys = (broken_local ∪ broken_remote) − ignored, each mapped back
// to its origin pages from the index. A key missing from the index gets an
// empty page set instead of a panic.
pub fn assemble(
    index: &ReferenceIndex,
    broken_local: &BTreeSet<PathBuf>,
    broken_remote: &BTreeSet<String>,
    ignore: &IgnoreSet,
) -> BrokenReport {
    let broken = broken_local
        .iter()
        .cloned()
        .map(Reference::Local)
        .chain(broken_remote.iter().cloned().map(Reference::Network));

    let entries = broken
        .filter(|reference| !ignore.contains(reference))
        .map(|reference| {
            let pages = index.origins(&reference).cloned().unwrap_or_default();
            (reference, pages)
        })
        .collect();

    BrokenReport { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn index() -> ReferenceIndex {
        let mut index = ReferenceIndex::new();
        index.insert(Reference::Local(PathBuf::from("/site/missing.html")), PathBuf::from("/site/index.html"));
        index.insert(Reference::Network("http://dead.example/x".into()), PathBuf::from("/site/index.html"));
        index.insert(Reference::Network("http://dead.example/x".into()), PathBuf::from("/site/about.html"));
        index.insert(Reference::Network("https://alive.example/".into()), PathBuf::from("/site/index.html"));
        index
    }

    #[test]
    fn test_assemble_maps_broken_to_pages() {
        let report = assemble(
            &index(),
            &BTreeSet::from([PathBuf::from("/site/missing.html")]),
            &BTreeSet::from(["http://dead.example/x".to_string()]),
            &IgnoreSet::new(),
        );

        assert_eq!(report.len(), 2);
        let pages = report.pages(&Reference::Network("http://dead.example/x".into())).unwrap();
        assert_eq!(
            pages,
            &BTreeSet::from([PathBuf::from("/site/about.html"), PathBuf::from("/site/index.html")])
        );
        assert!(!report.contains(&Reference::Network("https://alive.example/".into())));
    }

    #[test]
    fn test_ignored_references_never_reported() {
        let ignore = IgnoreSet::parse("http://dead.example/x\nmissing.html\n", Path::new("/site"));
        let report = assemble(
            &index(),
            &BTreeSet::from([PathBuf::from("/site/missing.html")]),
            &BTreeSet::from(["http://dead.example/x".to_string()]),
            &ignore,
        );

        assert!(report.is_empty());
    }

    #[test]
    fn test_unknown_key_gets_empty_pages() {
        let report = assemble(
            &ReferenceIndex::new(),
            &BTreeSet::from([PathBuf::from("/site/ghost.html")]),
            &BTreeSet::new(),
            &IgnoreSet::new(),
        );

        let pages = report.pages(&Reference::Local(PathBuf::from("/site/ghost.html"))).unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn test_display_lists_pages() {
        let report = assemble(
            &index(),
            &BTreeSet::new(),
            &BTreeSet::from(["http://dead.example/x".to_string()]),
            &IgnoreSet::new(),
        );

        let expected = "- 'http://dead.example/x' was found in the following pages:\n  - `/site/about.html`\n  - `/site/index.html`\n";
        assert_eq!(report.to_string(), expected);
    }

    #[test]
    fn test_json_is_an_array_of_entries() {
        let report = assemble(
            &index(),
            &BTreeSet::from([PathBuf::from("/site/missing.html")]),
            &BTreeSet::new(),
            &IgnoreSet::new(),
        );

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{
                "kind": "local",
                "target": "/site/missing.html",
                "pages": ["/site/index.html"]
            }])
        );
    }
}
