// src/check.rs
// =============================================================================
// The whole pipeline, from a root directory to a BrokenReport.
//
// 1. Validate configuration (root exists, ignore file is a file)
// 2. Build the reference index (single-threaded scan)
// 3. Check local paths on disk and probe remote URLs concurrently
// 4. Fold the failures back into a report, minus ignored references
// =============================================================================

use crate::checker::{broken_local, probe_all, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};
use crate::error::LinkCheckError;
use crate::ignore::IgnoreSet;
use crate::report::{assemble, BrokenReport};
use crate::scan::build_index;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

/// Everything a run needs to know.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Directory searched recursively for HTML files
    pub root: PathBuf,
    /// Host (without protocol) the site is served from
    pub host: Option<String>,
    /// File listing references to ignore
    pub ignore_file: Option<PathBuf>,
    /// Max simultaneous remote probes
    pub concurrency: usize,
    /// Per-probe timeout
    pub timeout: Duration,
}

impl CheckConfig {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            host: None,
            ignore_file: None,
            concurrency: DEFAULT_CONCURRENCY,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

// Runs a full check and returns the broken references
//
// Only configuration problems (and an unbuildable HTTP client) are errors.
// Missing files and dead URLs are reported, never raised.
pub async fn link_check(config: &CheckConfig) -> Result<BrokenReport, LinkCheckError> {
    if !config.root.exists() {
        return Err(LinkCheckError::RootNotFound(config.root.clone()));
    }

    let ignore = match &config.ignore_file {
        Some(file) => IgnoreSet::load(file, &config.root)?,
        None => IgnoreSet::new(),
    };

    let host = config.host.as_deref().filter(|host| !host.is_empty());
    let index = build_index(&config.root, host);
    info!(references = index.len(), "index built");

    let broken_paths = broken_local(index.local_paths());

    let addresses = index.network_addresses();
    let broken_urls = if addresses.is_empty() {
        BTreeSet::new()
    } else {
        probe_all(&addresses, config.concurrency, config.timeout).await?
    };

    let report = assemble(&index, &broken_paths, &broken_urls, &ignore);
    info!(broken = report.len(), "report assembled");
    Ok(report)
}
