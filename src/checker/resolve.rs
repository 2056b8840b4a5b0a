// src/checker/resolve.rs
// =============================================================================
// This module decides what a raw href/src value actually points at.
//
// Every raw value ends up as exactly one of:
// - Resolved::Local(path)    a canonical path on disk under the site root
// - Resolved::Network(url)   an absolute http(s) URL, query/fragment removed
// - Resolved::Discard        nothing we can check (mailto:, tel:, "#top", ...)
//
// Links to the site's own host (when --host is given) are treated as local:
// "https://example.com/a/b" and "/a/b" point at the same file.
// =============================================================================

use serde::Serialize;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A normalized link target. Two raw strings that name the same resource
/// produce equal `Reference`s, which is what lets the index deduplicate.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Reference {
    /// Absolute, canonical filesystem path
    Local(PathBuf),
    /// Absolute http/https URL without query or fragment
    Network(String),
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reference::Local(path) => write!(f, "{}", path.display()),
            Reference::Network(url) => f.write_str(url),
        }
    }
}

/// Outcome of resolving one raw attribute value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    Local(PathBuf),
    Network(String),
    Discard,
}

impl Resolved {
    pub fn into_reference(self) -> Option<Reference> {
        match self {
            Resolved::Local(path) => Some(Reference::Local(path)),
            Resolved::Network(url) => Some(Reference::Network(url)),
            Resolved::Discard => None,
        }
    }
}

// Turns raw link values into `Resolved` targets for one site root
//
// Built once per run; resolving is a pure function of (raw, source file)
// apart from the filesystem lookups done by canonicalization.
#[derive(Debug, Clone)]
pub struct Resolver {
    root: PathBuf,
    // "http://host", "https://host", "http://www.host", "https://www.host"
    host_prefixes: Vec<String>,
}

impl Resolver {
    pub fn new(root: &Path, host: Option<&str>) -> Self {
        let host_prefixes = match host.filter(|h| !h.is_empty()) {
            Some(host) => ["http://", "https://", "http://www.", "https://www."]
                .iter()
                .map(|scheme| format!("{scheme}{host}"))
                .collect(),
            None => Vec::new(),
        };

        Self {
            root: canonicalize_lenient(root),
            host_prefixes,
        }
    }

    /// The canonical root every "/..." link is resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    // Resolves a raw href/src value found in `source_file`
    //
    // Examples (host = "example.com", source = <root>/blog/post.html):
    //   "https://example.com/a/b"   -> Local(<root>/a/b)
    //   "../img/x.png"              -> Local(<root>/img/x.png)
    //   "//cdn.org/lib.js?v=2"      -> Network("http://cdn.org/lib.js")
    //   "mailto:me@example.com"     -> Discard
    //
    // Surrounding whitespace is ignored, as browsers do for href values.
    pub fn resolve(&self, raw: &str, source_file: &Path) -> Resolved {
        let (remainder, known_local) = self.strip_host(raw.trim());
        let parts = UrlParts::split(remainder);

        if known_local || (parts.scheme.is_empty() && parts.netloc.is_empty()) {
            // "#section", "?page=2", ... point back at the page itself.
            // A bare host link ("https://example.com") keeps its empty path
            // and lands on the source file's directory.
            if parts.path.is_empty() && !known_local {
                return Resolved::Discard;
            }
            return Resolved::Local(self.resolve_local(parts.path, source_file));
        }

        match parts.into_network_address() {
            Some(url) => Resolved::Network(url),
            None => Resolved::Discard,
        }
    }

    // Removes a leading "http(s)://[www.]host" if present
    fn strip_host<'a>(&self, raw: &'a str) -> (&'a str, bool) {
        let mut remainder = raw;
        let mut known_local = false;
        for prefix in &self.host_prefixes {
            if let Some(rest) = remainder.strip_prefix(prefix.as_str()) {
                remainder = rest;
                known_local = true;
            }
        }
        (remainder, known_local)
    }

    fn resolve_local(&self, path: &str, source_file: &Path) -> PathBuf {
        let joined = match path.strip_prefix('/') {
            Some(rest) => self.root.join(rest),
            None => source_file.parent().unwrap_or(&self.root).join(path),
        };
        canonicalize_lenient(&joined)
    }
}

/// Normalizes an absolute or protocol-relative URL the same way links are
/// normalized: default scheme `http`, query and fragment dropped.
/// Returns `None` for anything that is not http/https.
pub fn normalize_network_address(raw: &str) -> Option<String> {
    let parts = UrlParts::split(raw.trim());
    if parts.scheme.is_empty() && parts.netloc.is_empty() {
        return None;
    }
    parts.into_network_address()
}

// The pieces of a URL we care about. Splitting follows the generic
// "scheme:[//netloc]path[?query][#fragment]" shape and works on relative
// references too, which `url::Url` refuses to parse on its own.
#[derive(Debug, PartialEq, Eq)]
struct UrlParts<'a> {
    scheme: String,
    netloc: &'a str,
    path: &'a str,
}

impl<'a> UrlParts<'a> {
    fn split(raw: &'a str) -> Self {
        let mut rest = raw;

        let mut scheme = String::new();
        if let Some(colon) = rest.find(':') {
            let candidate = &rest[..colon];
            if is_scheme(candidate) {
                scheme = candidate.to_ascii_lowercase();
                rest = &rest[colon + 1..];
            }
        }

        let mut netloc = "";
        if let Some(after) = rest.strip_prefix("//") {
            let end = after.find(['/', '?', '#']).unwrap_or(after.len());
            netloc = &after[..end];
            rest = &after[end..];
        }

        // query and fragment are never part of what we check
        let end = rest.find(['?', '#']).unwrap_or(rest.len());
        let path = &rest[..end];

        Self {
            scheme,
            netloc,
            path,
        }
    }

    fn into_network_address(self) -> Option<String> {
        // Protocol-relative links ("//host/x") are assumed to be plain HTTP
        let scheme = if self.scheme.is_empty() {
            "http"
        } else {
            self.scheme.as_str()
        };

        if scheme != "http" && scheme != "https" {
            return None;
        }

        let separator = if self.path.is_empty() || self.path.starts_with('/') {
            ""
        } else {
            "/"
        };
        Some(format!("{scheme}://{}{separator}{}", self.netloc, self.path))
    }
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// Canonicalizes a path without requiring it to exist.
///
/// Components are applied one at a time: each prefix that exists goes
/// through the filesystem (so symlinks resolve), the rest are normalized
/// lexically: `.` is dropped and `..` removes the previous component.
pub fn canonicalize_lenient(path: &Path) -> PathBuf {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(path),
            Err(_) => path.to_path_buf(),
        }
    };

    let mut resolved = PathBuf::new();

    for component in absolute.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => resolved.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(name) => {
                // A missing component may be popped again by a later "..",
                // so every step gets its own filesystem lookup
                let candidate = resolved.join(name);
                resolved = candidate.canonicalize().unwrap_or(candidate);
            }
        }
    }

    resolved
}
