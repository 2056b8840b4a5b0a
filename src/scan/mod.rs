// src/scan/mod.rs
// =============================================================================
// This module handles scanning the rendered site on disk.
//
// Features:
// - Recursive discovery of .html/.htm pages
// - Reverse index: reference -> pages that link to it
// =============================================================================

mod index;

pub use index::{build_index, ReferenceIndex};
