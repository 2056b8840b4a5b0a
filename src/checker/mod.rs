// src/checker/mod.rs
// =============================================================================
// This module contains all link checking logic.
//
// Submodules:
// - html: pulls raw href/src values out of pages
// - resolve: turns a raw value into a local path, a URL, or nothing
// - local: existence checks for local paths
// - http: concurrent liveness probes for remote URLs
//
// This file re-exports the public API so callers can write
// `checker::probe_all()` instead of `checker::http::probe_all()`.
// =============================================================================

mod html;
mod http;
mod local;
mod resolve;

pub use html::extract_references;
pub use http::{probe_all, DEFAULT_CONCURRENCY, DEFAULT_TIMEOUT_SECS};
pub use local::broken_local;
pub use resolve::{canonicalize_lenient, normalize_network_address, Reference, Resolver};
