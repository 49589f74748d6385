//! Fork status collection and table rendering.
//!
//! This module runs the per-fork pipeline: match the fork to a dependency,
//! work out the tracked branch, then look up the branch age, the upstream
//! pull request and its merge state. Every lookup degrades to a placeholder
//! on failure, so building a row never fails.

mod row;
mod status;

pub use row::{render_table, StatusRow, DESCRIPTION_MAX_CHARS, DIVIDER, HEADER, PLACEHOLDER};
pub use status::{ForkStatus, PullRequestStatus};

use crate::constraint::parse_branch;
use crate::fetcher::{MetadataSource, RepositoryInfo};
use crate::manifest::{DependencyMap, ForkEntry};
use crate::matcher::resolve_dependency;
use crate::repository::GitHubRepo;
use chrono::{DateTime, Utc};
use tracing::{debug, info, info_span, warn, Instrument};

/// Collects the status of a single fork.
///
/// This function:
/// 1. Resolves the dependency the fork provides
/// 2. Fetches the repository description (and fork parent)
/// 3. For branch-tracking constraints, fetches the branch head commit
/// 4. Looks for an open pull request from the branch on the upstream repository
/// 5. Fetches the merge state of the first such pull request
///
/// Failed lookups are logged and leave the corresponding field unknown.
pub async fn collect_status<S: MetadataSource>(
    source: &S,
    fork: &ForkEntry,
    dependencies: &DependencyMap,
) -> ForkStatus {
    let span = info_span!("fork", url = %fork.url);

    async {
        let mut status = ForkStatus::new(fork.clone());

        status.dependency = resolve_dependency(source, fork, dependencies).await;
        match &status.dependency {
            Some(dependency) => info!(
                package = %dependency.package,
                constraint = %dependency.constraint,
                tier = ?dependency.tier,
                "Matched dependency"
            ),
            None => info!("No matching dependency"),
        }

        let info = match &fork.repo {
            Some(repo) => fetch_repository_info(source, repo).await,
            None => {
                warn!("Could not determine owner and repository from URL");
                None
            }
        };
        status.description = info.as_ref().and_then(|i| i.description.clone());

        status.branch = status
            .dependency
            .as_ref()
            .and_then(|dependency| parse_branch(&dependency.constraint));

        let Some(branch) = status.branch.clone() else {
            debug!("Constraint does not track a branch");
            return status;
        };

        let Some(repo) = &fork.repo else {
            status.pull_request = PullRequestStatus::Unknown;
            return status;
        };

        status.last_commit = match source.latest_commit(&repo.owner, &repo.name, &branch).await {
            Ok(commit) => Some(commit.timestamp),
            Err(e) => {
                warn!(branch = %branch, error = %e, "Failed to fetch branch head");
                None
            }
        };

        let upstream = info
            .and_then(|i| i.parent)
            .unwrap_or_else(|| repo.clone());
        status.pull_request = fetch_pull_request(source, &upstream, repo, &branch).await;

        status
    }
    .instrument(span)
    .await
}

/// Collects the status of a single fork and renders its table row.
pub async fn build_row<S: MetadataSource>(
    source: &S,
    fork: &ForkEntry,
    dependencies: &DependencyMap,
    now: DateTime<Utc>,
) -> StatusRow {
    collect_status(source, fork, dependencies).await.to_row(now)
}

async fn fetch_repository_info<S: MetadataSource>(
    source: &S,
    repo: &GitHubRepo,
) -> Option<RepositoryInfo> {
    match source.repository_info(&repo.owner, &repo.name).await {
        Ok(info) => Some(info),
        Err(e) => {
            warn!(error = %e, "Failed to fetch repository info");
            None
        }
    }
}

/// Finds the first open pull request from `fork:branch` on `upstream`.
async fn fetch_pull_request<S: MetadataSource>(
    source: &S,
    upstream: &GitHubRepo,
    fork: &GitHubRepo,
    branch: &str,
) -> PullRequestStatus {
    let pulls = match source
        .open_pull_requests(&upstream.owner, &upstream.name, &fork.owner, branch)
        .await
    {
        Ok(pulls) => pulls,
        Err(e) => {
            warn!(upstream = %upstream, error = %e, "Failed to list pull requests");
            return PullRequestStatus::Unknown;
        }
    };

    let Some(pull) = pulls.into_iter().next() else {
        debug!(upstream = %upstream, "No open pull request");
        return PullRequestStatus::NotOpened;
    };

    let merged = match source
        .merge_status(&upstream.owner, &upstream.name, pull.number)
        .await
    {
        Ok(merged) => Some(merged),
        Err(e) => {
            warn!(pr_number = pull.number, error = %e, "Failed to fetch merge status");
            None
        }
    };

    PullRequestStatus::Open {
        url: pull.url,
        number: pull.number,
        merged,
    }
}
