// src/ignore.rs
// =============================================================================
// The ignore list: references that are never reported, broken or not.
//
// File format: one entry per line, blank lines skipped.
// - An http(s) URL ignores that URL (compared after normalization)
// - Anything else is a path relative to the site root. It is also
//   matched against the host of remote links, so a line "dead.example"
//   silences every link to http(s)://dead.example/...
// =============================================================================

use crate::checker::{canonicalize_lenient, normalize_network_address, Reference};
use crate::error::LinkCheckError;
use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use url::Url;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IgnoreSet {
    paths: BTreeSet<PathBuf>,
    urls: BTreeSet<String>,
    hosts: BTreeSet<String>,
}

impl IgnoreSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads an ignore file. The file must exist and be a regular file.
    pub fn load(file: &Path, root: &Path) -> Result<Self, LinkCheckError> {
        if !file.is_file() {
            return Err(LinkCheckError::IgnoreFileNotFound(file.to_path_buf()));
        }
        let text = fs::read_to_string(file).map_err(|e| LinkCheckError::io(file, e))?;
        Ok(Self::parse(&text, root))
    }

    pub fn parse(text: &str, root: &Path) -> Self {
        let mut set = Self::new();

        for line in text.lines().map(str::trim).filter(|line| !line.is_empty()) {
            if is_web_url(line) {
                if let Some(url) = normalize_network_address(line) {
                    set.urls.insert(url);
                }
                set.urls.insert(line.to_string());
            } else {
                set.paths.insert(canonicalize_lenient(&root.join(line)));
                set.hosts.insert(line.to_ascii_lowercase());
            }
        }

        debug!(
            paths = set.paths.len(),
            urls = set.urls.len(),
            "loaded ignore list"
        );
        set
    }

    pub fn contains(&self, reference: &Reference) -> bool {
        match reference {
            Reference::Local(path) => self.paths.contains(path),
            Reference::Network(url) => self.urls.contains(url) || self.host_ignored(url),
        }
    }

    fn host_ignored(&self, url: &str) -> bool {
        Url::parse(url)
            .ok()
            .and_then(|parsed| parsed.host_str().map(str::to_ascii_lowercase))
            .is_some_and(|host| self.hosts.contains(&host))
    }
}

// Anything url::Url accepts with an http(s) scheme and a host
fn is_web_url(line: &str) -> bool {
    Url::parse(line)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_splits_urls_and_paths() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().canonicalize().unwrap();
        let text = "\nhttps://dead.example/x?utm=1\n\n  drafts/old.html  \n";

        let ignore = IgnoreSet::parse(text, &root);

        assert!(ignore.contains(&Reference::Network("https://dead.example/x".to_string())));
        assert!(ignore.contains(&Reference::Local(root.join("drafts/old.html"))));
        assert!(!ignore.contains(&Reference::Local(root.join("drafts/new.html"))));
        assert!(!ignore.contains(&Reference::Network("https://dead.example/y".to_string())));
    }

    #[test]
    fn test_bare_host_ignores_all_links_to_it() {
        let ignore = IgnoreSet::parse("dead.example\n", Path::new("/site"));

        assert!(ignore.contains(&Reference::Network("http://dead.example/x".to_string())));
        assert!(ignore.contains(&Reference::Network("https://DEAD.example/".to_string())));
        assert!(!ignore.contains(&Reference::Network("http://alive.example/x".to_string())));
    }

    #[test]
    fn test_load_missing_file_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.txt");

        let err = IgnoreSet::load(&missing, dir.path()).unwrap_err();
        assert!(matches!(err, LinkCheckError::IgnoreFileNotFound(_)));
    }

    #[test]
    fn test_load_directory_is_configuration_error() {
        let dir = TempDir::new().unwrap();
        let err = IgnoreSet::load(dir.path(), dir.path()).unwrap_err();
        assert!(matches!(err, LinkCheckError::IgnoreFileNotFound(_)));
    }

    #[test]
    fn test_load_reads_file() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("ignore.txt");
        fs::write(&file, "https://example.org/\n").unwrap();

        let ignore = IgnoreSet::load(&file, dir.path()).unwrap();
        assert!(ignore.contains(&Reference::Network("https://example.org/".to_string())));
    }
}
