//! Values returned by a [`MetadataSource`](super::MetadataSource).

use crate::repository::GitHubRepo;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Repository details used in the report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RepositoryInfo {
    /// Free-form description, if the repository has one.
    pub description: Option<String>,

    /// Repository this one was forked from.
    pub parent: Option<GitHubRepo>,
}

/// Head commit of a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommitInfo {
    /// When the commit was made.
    pub timestamp: DateTime<Utc>,
}

/// An open pull request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PullRequestRef {
    /// Browsable pull request URL.
    pub url: String,

    /// Pull request number.
    pub number: u64,
}

/// `GET /repos/{owner}/{repo}/branches/{branch}`, reduced to the head commit dates.
#[derive(Debug, Deserialize)]
pub(crate) struct BranchPayload {
    pub commit: BranchCommit,
}

#[derive(Debug, Deserialize)]
pub(crate) struct BranchCommit {
    pub commit: CommitDetails,
}

#[derive(Debug, Deserialize)]
pub(crate) struct CommitDetails {
    pub author: Option<Signature>,
    pub committer: Option<Signature>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Signature {
    pub date: Option<DateTime<Utc>>,
}

impl BranchPayload {
    /// Committer date, falling back to the author date.
    pub(crate) fn timestamp(&self) -> Option<DateTime<Utc>> {
        let details = &self.commit.commit;
        details
            .committer
            .as_ref()
            .and_then(|signature| signature.date)
            .or_else(|| details.author.as_ref().and_then(|signature| signature.date))
    }
}
