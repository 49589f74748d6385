//! Read-only access to repository metadata.
//!
//! [`MetadataSource`] is the seam between the report and the network:
//! [`GitHubFetcher`] talks to the GitHub REST API, tests supply canned data.
//! Every operation returns a [`FetchError`] instead of panicking, and callers
//! decide which placeholder a failure turns into.

mod error;
mod github;
mod types;

pub use error::FetchError;
pub use github::GitHubFetcher;
pub use types::{CommitInfo, PullRequestRef, RepositoryInfo};

/// Source of repository metadata.
#[allow(async_fn_in_trait)]
pub trait MetadataSource {
    /// Returns the contents of the file at `path` on `reference`.
    async fn file_at_ref(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<String, FetchError>;

    /// Returns the repository description and fork parent.
    async fn repository_info(&self, owner: &str, repo: &str) -> Result<RepositoryInfo, FetchError>;

    /// Returns the head commit of `branch`.
    async fn latest_commit(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<CommitInfo, FetchError>;

    /// Lists open pull requests on `owner/repo` whose head is `head_owner:head_branch`.
    async fn open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        head_owner: &str,
        head_branch: &str,
    ) -> Result<Vec<PullRequestRef>, FetchError>;

    /// Returns whether pull request `number` has been merged.
    async fn merge_status(&self, owner: &str, repo: &str, number: u64) -> Result<bool, FetchError>;

    /// Called before each fork is processed; waits for API capacity if the
    /// source is rate limited.
    async fn throttle(&self) {}
}
