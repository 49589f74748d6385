//! Declared fork repositories.

use crate::repository::{canonical_url, display_name, GitHubRepo};
use serde::Serialize;

/// A forked repository declared in the manifest's `repositories` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ForkEntry {
    /// Raw repository URL as written in the manifest.
    pub url: String,

    /// Owner and name, when the URL has a recognised GitHub shape.
    pub repo: Option<GitHubRepo>,

    /// Last URL path segment without `.git`; used as label and match key.
    pub display_name: String,
}

impl ForkEntry {
    /// Derives every field from the raw URL.
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        Self {
            repo: GitHubRepo::parse(&url),
            display_name: display_name(&url),
            url,
        }
    }

    /// Repository owner, when determined.
    #[must_use]
    pub fn owner(&self) -> Option<&str> {
        self.repo.as_ref().map(|repo| repo.owner.as_str())
    }

    /// Browsable link to the fork.
    ///
    /// Falls back to the canonicalized raw URL when owner and name are unknown.
    #[must_use]
    pub fn html_url(&self) -> String {
        match &self.repo {
            Some(repo) => repo.html_url(),
            None => canonical_url(&self.url),
        }
    }
}
