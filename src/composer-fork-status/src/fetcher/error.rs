//! Fetcher error types.

use thiserror::Error;

/// Errors that can occur while reading metadata from GitHub.
#[derive(Debug, Error)]
pub enum FetchError {
    /// GitHub API error (network failure, non-2xx status, undecodable payload).
    #[error("GitHub API error: {0}")]
    GitHubError(#[from] octocrab::Error),

    /// The contents endpoint answered without a decodable file.
    #[error("No content for '{path}' at '{reference}'")]
    MissingContent { path: String, reference: String },

    /// The branch head commit carries no timestamp.
    #[error("No commit date on branch '{branch}'")]
    MissingCommitDate { branch: String },

    /// Lookup failure reported by a [`MetadataSource`](super::MetadataSource)
    /// that is not backed by octocrab, such as a mirror or an offline cache.
    /// [`GitHubFetcher`](super::GitHubFetcher) reports through the variants
    /// above instead.
    #[error("Unavailable: {0}")]
    Unavailable(String),
}
