//! GitHub REST implementation of [`MetadataSource`].

use super::types::BranchPayload;
use super::{CommitInfo, FetchError, MetadataSource, PullRequestRef, RepositoryInfo};
use crate::constraint::encode_branch;
use crate::rate_limit::ensure_core_rate_limit;
use crate::repository::GitHubRepo;
use octocrab::params::State;
use octocrab::Octocrab;
use tracing::debug;

/// Page size for pull request listings. Only the first page is read.
const PULLS_PER_PAGE: u8 = 100;

/// Fetches repository metadata through an [`Octocrab`] client.
#[derive(Clone)]
pub struct GitHubFetcher {
    octocrab: Octocrab,
}

impl GitHubFetcher {
    /// Wraps an existing client.
    #[must_use]
    pub fn new(octocrab: Octocrab) -> Self {
        Self { octocrab }
    }

    /// Builds a client, authenticated when a token is given.
    ///
    /// Anonymous access works but is subject to much lower rate limits.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_token(token: Option<&str>) -> Result<Self, octocrab::Error> {
        let builder = Octocrab::builder();
        let octocrab = match token {
            Some(token) => builder.personal_token(token.to_string()).build()?,
            None => builder.build()?,
        };
        Ok(Self::new(octocrab))
    }

    /// Returns the underlying client.
    #[must_use]
    pub fn client(&self) -> &Octocrab {
        &self.octocrab
    }
}

impl MetadataSource for GitHubFetcher {
    async fn file_at_ref(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<String, FetchError> {
        debug!(owner, repo, path, reference, "Fetching file");

        let contents = self
            .octocrab
            .repos(owner, repo)
            .get_content()
            .path(path)
            .r#ref(reference)
            .send()
            .await?;

        contents
            .items
            .into_iter()
            .next()
            .and_then(|item| item.decoded_content())
            .ok_or_else(|| FetchError::MissingContent {
                path: path.to_string(),
                reference: reference.to_string(),
            })
    }

    async fn repository_info(&self, owner: &str, repo: &str) -> Result<RepositoryInfo, FetchError> {
        debug!(owner, repo, "Fetching repository");

        let repository = self.octocrab.repos(owner, repo).get().await?;
        let parent = repository.parent.as_deref().and_then(|parent| {
            let owner = parent.owner.as_ref()?.login.clone();
            Some(GitHubRepo::new(owner, parent.name.clone()))
        });

        Ok(RepositoryInfo {
            description: repository.description,
            parent,
        })
    }

    async fn latest_commit(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<CommitInfo, FetchError> {
        debug!(owner, repo, branch, "Fetching branch head");

        let route = format!("/repos/{owner}/{repo}/branches/{}", encode_branch(branch));
        let payload: BranchPayload = self.octocrab.get(route, None::<&()>).await?;

        payload
            .timestamp()
            .map(|timestamp| CommitInfo { timestamp })
            .ok_or_else(|| FetchError::MissingCommitDate {
                branch: branch.to_string(),
            })
    }

    async fn open_pull_requests(
        &self,
        owner: &str,
        repo: &str,
        head_owner: &str,
        head_branch: &str,
    ) -> Result<Vec<PullRequestRef>, FetchError> {
        let head = format!("{head_owner}:{head_branch}");
        debug!(owner, repo, head = %head, "Listing open pull requests");

        let page = self
            .octocrab
            .pulls(owner, repo)
            .list()
            .state(State::Open)
            .head(head)
            .per_page(PULLS_PER_PAGE)
            .send()
            .await?;

        Ok(page
            .items
            .into_iter()
            .map(|pr| PullRequestRef {
                url: pr
                    .html_url
                    .as_ref()
                    .map(|u| u.to_string())
                    .unwrap_or_else(|| {
                        format!("https://github.com/{owner}/{repo}/pull/{}", pr.number)
                    }),
                number: pr.number,
            })
            .collect())
    }

    async fn merge_status(&self, owner: &str, repo: &str, number: u64) -> Result<bool, FetchError> {
        debug!(owner, repo, number, "Fetching merge status");
        Ok(self.octocrab.pulls(owner, repo).is_merged(number).await?)
    }

    async fn throttle(&self) {
        ensure_core_rate_limit(&self.octocrab).await;
    }
}
