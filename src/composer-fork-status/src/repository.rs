//! GitHub repository URL handling.
//!
//! Forks may be declared as `git@github.com:OWNER/REPO.git`,
//! `git://github.com/OWNER/REPO.git` or `https://github.com/OWNER/REPO`.
//! Every downstream consumer goes through [`GitHubRepo::parse`],
//! [`canonical_url`] or [`display_name`].

use crate::constraint::encode_branch;
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

/// Browsable base URL of the hosting platform.
pub const GITHUB_HTML_BASE: &str = "https://github.com/";

/// Prefixes of the accepted URL forms, rewritten to [`GITHUB_HTML_BASE`].
static URL_FORMS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
    [
        Regex::new(r"^git@github\.com:").expect("valid regex"),
        Regex::new(r"^git://github\.com/").expect("valid regex"),
        Regex::new(r"^https?://github\.com/").expect("valid regex"),
    ]
});

/// `github.com` followed by `:` or `/`, then the owner and repository segments.
static OWNER_REPO: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"github\.com[:/]([^/]+)/([^/.]+)").expect("valid regex"));

/// Owner and name of a repository hosted on GitHub.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitHubRepo {
    /// Repository owner (user or organization).
    pub owner: String,

    /// Repository name.
    pub name: String,
}

impl GitHubRepo {
    /// Creates a repository reference from its parts.
    pub fn new(owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Extracts owner and name from any accepted URL form.
    ///
    /// Returns `None` when the URL does not point at a GitHub repository.
    ///
    /// # Examples
    ///
    /// ```
    /// use composer_fork_status::GitHubRepo;
    ///
    /// let repo = GitHubRepo::parse("git@github.com:acme/widget.git").unwrap();
    /// assert_eq!(repo, GitHubRepo::new("acme", "widget"));
    /// assert!(GitHubRepo::parse("https://gitlab.com/acme/widget").is_none());
    /// ```
    #[must_use]
    pub fn parse(url: &str) -> Option<Self> {
        let captures = OWNER_REPO.captures(url)?;
        Some(Self::new(&captures[1], &captures[2]))
    }

    /// Returns `https://github.com/{owner}/{name}`.
    #[must_use]
    pub fn html_url(&self) -> String {
        format!("{GITHUB_HTML_BASE}{}/{}", self.owner, self.name)
    }

    /// Returns the browsable URL of a branch, with the branch percent-encoded.
    #[must_use]
    pub fn tree_url(&self, branch: &str) -> String {
        format!("{}/tree/{}", self.html_url(), encode_branch(branch))
    }
}

impl fmt::Display for GitHubRepo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

/// Rewrites any accepted URL form to its `https://github.com/...` equivalent.
///
/// The remainder of the URL, including a trailing `.git`, is kept as is.
/// URLs in none of the accepted forms are returned unchanged.
///
/// # Examples
///
/// ```
/// use composer_fork_status::canonical_url;
///
/// assert_eq!(
///     canonical_url("git://github.com/acme/widget.git"),
///     "https://github.com/acme/widget.git"
/// );
/// ```
#[must_use]
pub fn canonical_url(url: &str) -> String {
    URL_FORMS
        .iter()
        .find_map(|form| {
            form.find(url)
                .map(|prefix| format!("{GITHUB_HTML_BASE}{}", &url[prefix.end()..]))
        })
        .unwrap_or_else(|| url.to_string())
}

/// Returns the last path segment of a URL without its `.git` suffix.
///
/// The `:` of the SSH form counts as a segment separator.
///
/// # Examples
///
/// ```
/// use composer_fork_status::display_name;
///
/// assert_eq!(display_name("git@github.com:acme/widget.git"), "widget");
/// ```
#[must_use]
pub fn display_name(url: &str) -> String {
    let trimmed = url.trim_end_matches('/');
    let segment = trimmed.rsplit(['/', ':']).next().unwrap_or(trimmed);
    segment.strip_suffix(".git").unwrap_or(segment).to_string()
}
