//! Output sink error types.

use thiserror::Error;

/// Errors that can occur while delivering the report.
#[derive(Debug, Error)]
pub enum OutputError {
    /// Failed to append to a GitHub Actions file.
    #[error("Failed to write '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
