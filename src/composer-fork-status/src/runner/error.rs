//! Runner error types.

use crate::manifest::ManifestError;
use crate::output::OutputError;

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    /// Manifest loading errors.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    /// GitHub API client initialization errors.
    #[error(transparent)]
    Octocrab(#[from] octocrab::Error),
    /// Report delivery errors.
    #[error(transparent)]
    Output(#[from] OutputError),
}
