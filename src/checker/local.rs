// src/checker/local.rs
// =============================================================================
// Existence checks for links that point into the site itself.
//
// Static site generators love "pretty" URLs: /about is served from
// about.html on disk. So for a path without an extension we look for the
// .html file first and only then for the path itself.
// =============================================================================

use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Does `path` (or `path.html`, for extension-less paths) exist?
pub fn html_exists(path: &Path) -> bool {
    if path.extension().is_none() {
        let mut with_html = OsString::from(path.as_os_str());
        with_html.push(".html");
        if Path::new(&with_html).exists() {
            return true;
        }
    }
    path.exists()
}

// Returns the local paths that do not exist on disk
pub fn broken_local<'a, I>(paths: I) -> BTreeSet<PathBuf>
where
    I: IntoIterator<Item = &'a PathBuf>,
{
    paths
        .into_iter()
        .filter(|path| {
            let missing = !html_exists(path);
            if missing {
                debug!(path = %path.display(), "missing local target");
            }
            missing
        })
        .cloned()
        .collect()
}
