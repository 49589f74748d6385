//! Per-fork status gathered from the manifest and GitHub.

use super::row::{StatusRow, PLACEHOLDER};
use crate::age::relative_time;
use crate::manifest::ForkEntry;
use crate::matcher::DependencyMatch;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Pull request state of a fork's tracked branch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PullRequestStatus {
    /// No branch is tracked, so there is nothing to look up.
    NotApplicable,

    /// The lookup failed or the repository could not be determined.
    Unknown,

    /// No open pull request has the branch as its head.
    NotOpened,

    /// First open pull request for the branch.
    Open {
        /// Browsable pull request URL.
        url: String,
        /// Pull request number.
        number: u64,
        /// Merge state, `None` when the lookup failed.
        merged: Option<bool>,
    },
}

impl PullRequestStatus {
    /// Cell shown in the "Fork PR" column.
    #[must_use]
    pub fn link_cell(&self) -> String {
        match self {
            Self::NotApplicable | Self::Unknown => PLACEHOLDER.to_string(),
            Self::NotOpened => "No PR".to_string(),
            Self::Open { url, .. } => format!("[PR]({url})"),
        }
    }

    /// Cell shown in the "Merged" column.
    #[must_use]
    pub fn merged_cell(&self) -> &'static str {
        match self {
            Self::Open {
                merged: Some(true), ..
            } => "Yes",
            Self::Open {
                merged: Some(false),
                ..
            } => "No",
            _ => PLACEHOLDER,
        }
    }
}

/// Everything known about one fork.
#[derive(Debug, Clone, Serialize)]
pub struct ForkStatus {
    /// The fork as declared in the manifest.
    pub fork: ForkEntry,

    /// Dependency the fork was matched to.
    pub dependency: Option<DependencyMatch>,

    /// Branch tracked by the dependency constraint.
    pub branch: Option<String>,

    /// Head commit time of the tracked branch.
    pub last_commit: Option<DateTime<Utc>>,

    /// Upstream pull request for the tracked branch.
    pub pull_request: PullRequestStatus,

    /// Repository description.
    pub description: Option<String>,
}

impl ForkStatus {
    /// Status of a fork nothing has been learned about yet.
    #[must_use]
    pub fn new(fork: ForkEntry) -> Self {
        Self {
            fork,
            dependency: None,
            branch: None,
            last_commit: None,
            pull_request: PullRequestStatus::NotApplicable,
            description: None,
        }
    }

    /// Renders the table row, computing the branch age relative to `now`.
    #[must_use]
    pub fn to_row(&self, now: DateTime<Utc>) -> StatusRow {
        let repo_link = self.fork.html_url();

        let (age, branch) = match (&self.branch, &self.fork.repo) {
            (Some(branch), Some(repo)) => (
                relative_time(self.last_commit, now),
                format!("[{branch}]({})", repo.tree_url(branch)),
            ),
            _ => (PLACEHOLDER.to_string(), PLACEHOLDER.to_string()),
        };

        StatusRow {
            age,
            package: format!("[{}]({repo_link})", self.fork.display_name),
            branch,
            fork_pr: self.pull_request.link_cell(),
            merged: self.pull_request.merged_cell().to_string(),
            description: StatusRow::description_cell(self.description.as_deref()),
        }
    }
}
