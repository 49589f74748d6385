//! Run summary types.

use crate::report::{ForkStatus, PullRequestStatus};
use serde::Serialize;

/// Counts gathered over a complete run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Number of forks reported.
    pub forks_processed: usize,

    /// Forks matched to a declared dependency.
    pub forks_matched: usize,

    /// Forks whose dependency tracks a branch.
    pub forks_tracking_branch: usize,

    /// Forks whose URL did not yield an owner and repository.
    pub forks_unresolved: usize,

    /// Tracked branches with an open upstream pull request.
    pub pull_requests_open: usize,

    /// Open pull requests reported as merged.
    pub pull_requests_merged: usize,

    /// Pull request lookups that failed.
    pub pull_requests_unknown: usize,
}

impl RunSummary {
    /// Creates a new empty summary.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Updates the summary with the status of one fork.
    pub fn record(&mut self, status: &ForkStatus) {
        self.forks_processed += 1;
        if status.fork.repo.is_none() {
            self.forks_unresolved += 1;
        }
        if status.dependency.is_some() {
            self.forks_matched += 1;
        }
        if status.branch.is_some() {
            self.forks_tracking_branch += 1;
        }
        match &status.pull_request {
            PullRequestStatus::Open { merged, .. } => {
                self.pull_requests_open += 1;
                if *merged == Some(true) {
                    self.pull_requests_merged += 1;
                }
            }
            PullRequestStatus::Unknown => self.pull_requests_unknown += 1,
            PullRequestStatus::NotApplicable | PullRequestStatus::NotOpened => {}
        }
    }

    /// Returns true if every fork was matched to a dependency.
    #[must_use]
    pub fn all_matched(&self) -> bool {
        self.forks_matched == self.forks_processed
    }
}
