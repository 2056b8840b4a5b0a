// src/error.rs
// =============================================================================
// Error types for the checking pipeline.
//
// Only configuration problems and HTTP client construction are fatal.
// A broken link is never an error: it is a result that ends up in the report.
// =============================================================================

use std::path::PathBuf;
use thiserror::Error;

/// Errors that stop a run before (or instead of) producing a report.
#[derive(Debug, Error)]
pub enum LinkCheckError {
    /// The directory to scan does not exist.
    #[error("{} does not exist.", .0.display())]
    RootNotFound(PathBuf),

    /// The ignore list is missing or is not a regular file.
    #[error("{} is either not a file or doesn't exist.", .0.display())]
    IgnoreFileNotFound(PathBuf),

    /// A file we had to read could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client used for probing could not be built.
    #[error("failed to create HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl LinkCheckError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
