//! Manifest error types.

use thiserror::Error;

/// Errors that can occur while loading the Composer manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
    /// Failed to read the manifest file.
    #[error("Failed to read manifest '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON content.
    #[error("Failed to parse manifest '{path}': {source}")]
    JsonError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Manifest file does not exist.
    #[error("Missing manifest file: {path}")]
    MissingFile { path: String },
}
