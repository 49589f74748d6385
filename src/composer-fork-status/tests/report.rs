use chrono::{DateTime, Duration, TimeZone, Utc};
use composer_fork_status::{
    build_row, collect_status, generate_report, render_table, CommitInfo, DependencyMap,
    FetchError, ForkEntry, GitHubRepo, Manifest, MatchTier, MetadataSource, PullRequestRef,
    PullRequestStatus, RepositoryInfo,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::path::PathBuf;

fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Canned GitHub data keyed by `owner/repo`.
#[derive(Default)]
struct StubSource {
    files: HashMap<(String, String), String>,
    repositories: HashMap<String, RepositoryInfo>,
    commits: HashMap<(String, String), DateTime<Utc>>,
    pulls: HashMap<(String, String), Vec<PullRequestRef>>,
    merged: HashMap<(String, u64), bool>,
    calls: RefCell<Vec<String>>,
}

impl StubSource {
    fn with_file(mut self, repo: &str, reference: &str, contents: &str) -> Self {
        self.files
            .insert((repo.to_string(), reference.to_string()), contents.to_string());
        self
    }

    fn with_repository(
        mut self,
        repo: &str,
        description: Option<&str>,
        parent: Option<GitHubRepo>,
    ) -> Self {
        self.repositories.insert(
            repo.to_string(),
            RepositoryInfo {
                description: description.map(str::to_string),
                parent,
            },
        );
        self
    }

    fn with_commit(mut self, repo: &str, branch: &str, timestamp: DateTime<Utc>) -> Self {
        self.commits
            .insert((repo.to_string(), branch.to_string()), timestamp);
        self
    }

    fn with_pull(
        mut self,
        repo: &str,
        head: &str,
        url: &str,
        number: u64,
        merged: Option<bool>,
    ) -> Self {
        self.pulls
            .entry((repo.to_string(), head.to_string()))
            .or_default()
            .push(PullRequestRef {
                url: url.to_string(),
                number,
            });
        if let Some(merged) = merged {
            self.merged.insert((repo.to_string(), number), merged);
        }
        self
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

fn unavailable(what: String) -> FetchError {
    FetchError::Unavailable(format!("no canned data for {what}"))
}

impl MetadataSource for StubSource {
    async fn file_at_ref(
        &self,
        owner: &str,
        repo: &str,
        path: &str,
        reference: &str,
    ) -> Result<String, FetchError> {
        let key = (format!("{owner}/{repo}"), reference.to_string());
        self.record(format!("file {}@{reference}:{path}", key.0));
        self.files.get(&key).cloned().ok_or_else(|| FetchError::MissingContent {
            path: path.to_string(),
            reference: reference.to_string(),
        })
    }

    async fn repository_info(&self, owner: &str, repo: &str) -> Result<RepositoryInfo, FetchError> {
        let key = format!("{owner}/{repo}");
        self.record(format!("repo {key}"));
        self.repositories.get(&key).cloned().ok_or_else(|| unavailable(key))
    }

    async fn latest_commit(
        &self,
        owner: &str,
        repo: &str,
        branch: &str,
    ) -> Result<CommitInfo, FetchError> {
        let key = (format!("{owner}/{repo}"), branch.to_string());
        self.record(format!("commit {}@{branch}", key.0));
        self.commits
            .get(&key)
            .map(|timestamp| CommitInfo {
                timestamp: *timestamp,
            })
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
        let key = format!("{owner}/{repo}");
        let head = format!("{head_owner}:{head_branch}");
        self.record(format!("pulls {key} {head}"));
        if !self.repositories.contains_key(&key)
            && !self.pulls.keys().any(|(repo, _)| *repo == key)
        {
            return Err(unavailable(key));
        }
        Ok(self.pulls.get(&(key, head)).cloned().unwrap_or_default())
    }

    async fn merge_status(&self, owner: &str, repo: &str, number: u64) -> Result<bool, FetchError> {
        let key = format!("{owner}/{repo}");
        self.record(format!("merged {key}#{number}"));
        self.merged
            .get(&(key.clone(), number))
            .copied()
            .ok_or_else(|| unavailable(format!("{key}#{number}")))
    }
}

fn dependencies(entries: &[(&str, &str)]) -> DependencyMap {
    entries.iter().copied().collect()
}

#[tokio::test]
async fn renders_tracked_fork_with_open_pull_request() {
    let source = StubSource::default()
        .with_repository("acme/widget", Some("A sample widget library for testing"), None)
        .with_commit("acme/widget", "feature/y", now() - Duration::seconds(86_400))
        .with_pull("acme/widget", "acme:feature/y", "https://x/pull/9", 9, Some(false));
    let fork = ForkEntry::new("git@github.com:acme/widget.git");
    let deps = dependencies(&[("acme/widget", "dev-feature/y")]);

    let row = build_row(&source, &fork, &deps, now()).await;

    assert_eq!(row.age, "1 day ago");
    assert_eq!(row.package, "[widget](https://github.com/acme/widget)");
    assert_eq!(
        row.branch,
        "[feature/y](https://github.com/acme/widget/tree/feature%2Fy)"
    );
    assert_eq!(row.fork_pr, "[PR](https://x/pull/9)");
    assert_eq!(row.merged, "No");
    assert_eq!(row.description, "A sample widget library f…");
}

#[tokio::test]
async fn unmatched_fork_keeps_link_and_description() {
    let source = StubSource::default().with_repository("acme/widget", Some("Widgets"), None);
    let fork = ForkEntry::new("https://github.com/acme/widget");
    let deps = dependencies(&[("other/gadget", "dev-main")]);

    let row = build_row(&source, &fork, &deps, now()).await;

    assert_eq!(
        row.to_string(),
        "| - | [widget](https://github.com/acme/widget) | - | - | - | Widgets |"
    );
    assert!(!source.calls().iter().any(|call| call.starts_with("commit")));
    assert!(!source.calls().iter().any(|call| call.starts_with("pulls")));
}

#[tokio::test]
async fn release_constraint_is_not_tracked() {
    let source = StubSource::default();
    let fork = ForkEntry::new("https://github.com/acme/widget");
    let deps = dependencies(&[("acme/widget", "^1.0")]);

    let status = collect_status(&source, &fork, &deps).await;

    assert_eq!(status.dependency.as_ref().unwrap().package, "acme/widget");
    assert_eq!(status.branch, None);
    assert_eq!(status.pull_request, PullRequestStatus::NotApplicable);
    assert_eq!(
        status.to_row(now()).to_string(),
        "| - | [widget](https://github.com/acme/widget) | - | - | - | - |"
    );
}

#[tokio::test]
async fn declared_name_is_read_from_fallback_branch() {
    let source = StubSource::default().with_file(
        "forker/old-toolkit",
        "master",
        r#"{"name": "renamed/toolkit"}"#,
    );
    let fork = ForkEntry::new("git://github.com/forker/old-toolkit.git");
    let deps = dependencies(&[
        ("renamed/toolkit", "dev-fix/php84"),
        ("acme/toolkit", "dev-main"),
    ]);

    let status = collect_status(&source, &fork, &deps).await;
    let dependency = status.dependency.unwrap();

    assert_eq!(dependency.package, "renamed/toolkit");
    assert_eq!(dependency.tier, MatchTier::DeclaredName);
    assert_eq!(status.branch.as_deref(), Some("fix/php84"));

    let calls = source.calls();
    assert_eq!(calls[0], "file forker/old-toolkit@main:composer.json");
    assert_eq!(calls[1], "file forker/old-toolkit@master:composer.json");
    assert!(!calls.iter().any(|call| call.contains("@develop")));
}

#[tokio::test]
async fn pull_requests_are_looked_up_on_the_parent() {
    let source = StubSource::default()
        .with_repository("forker/widget", None, Some(GitHubRepo::new("upstream", "widget")))
        .with_commit("forker/widget", "main", now() - Duration::days(400))
        .with_pull(
            "upstream/widget",
            "forker:main",
            "https://github.com/upstream/widget/pull/12",
            12,
            Some(true),
        );
    let fork = ForkEntry::new("https://github.com/forker/widget");
    let deps = dependencies(&[("upstream/widget", "dev-main as 2.x-dev")]);

    let row = build_row(&source, &fork, &deps, now()).await;

    assert_eq!(row.age, "1 year ago");
    assert_eq!(row.fork_pr, "[PR](https://github.com/upstream/widget/pull/12)");
    assert_eq!(row.merged, "Yes");
    assert_eq!(row.description, "-");
    assert!(source
        .calls()
        .contains(&"merged upstream/widget#12".to_string()));
}

#[tokio::test]
async fn first_pull_request_wins() {
    let source = StubSource::default()
        .with_repository("acme/widget", None, None)
        .with_pull("acme/widget", "acme:main", "https://x/pull/1", 1, Some(false))
        .with_pull("acme/widget", "acme:main", "https://x/pull/2", 2, Some(true));
    let fork = ForkEntry::new("https://github.com/acme/widget");
    let deps = dependencies(&[("acme/widget", "dev-main")]);

    let row = build_row(&source, &fork, &deps, now()).await;

    assert_eq!(row.fork_pr, "[PR](https://x/pull/1)");
    assert_eq!(row.merged, "No");
}

#[tokio::test]
async fn branch_without_pull_request() {
    let source = StubSource::default()
        .with_repository("acme/widget", Some("Widgets"), None)
        .with_commit("acme/widget", "main", now() - Duration::minutes(3));
    let fork = ForkEntry::new("https://github.com/acme/widget");
    let deps = dependencies(&[("acme/widget", "dev-main")]);

    let row = build_row(&source, &fork, &deps, now()).await;

    assert_eq!(row.age, "3 minutes ago");
    assert_eq!(row.branch, "[main](https://github.com/acme/widget/tree/main)");
    assert_eq!(row.fork_pr, "No PR");
    assert_eq!(row.merged, "-");
    assert_eq!(row.description, "Widgets");
}

#[tokio::test]
async fn failed_lookups_degrade_to_placeholders() {
    // Nothing is known about the repository: every lookup fails.
    let source = StubSource::default();
    let fork = ForkEntry::new("https://github.com/acme/widget");
    let deps = dependencies(&[("acme/widget", "dev-main")]);

    let row = build_row(&source, &fork, &deps, now()).await;

    assert_eq!(row.age, "-");
    assert_eq!(row.branch, "[main](https://github.com/acme/widget/tree/main)");
    assert_eq!(row.fork_pr, "-");
    assert_eq!(row.merged, "-");
    assert_eq!(row.description, "-");
}

#[tokio::test]
async fn undetermined_repository_makes_no_requests() {
    let source = StubSource::default();
    let fork = ForkEntry::new("https://github.com/widget");
    let deps = dependencies(&[("acme/widget", "dev-main")]);

    let row = build_row(&source, &fork, &deps, now()).await;

    assert!(source.calls().is_empty());
    assert_eq!(
        row.to_string(),
        "| - | [widget](https://github.com/widget) | - | - | - | - |"
    );
}

#[tokio::test]
async fn report_from_fixture_keeps_manifest_order() {
    let manifest = Manifest::load(&fixtures_root().join("composer.json")).unwrap();
    assert_eq!(manifest.dependencies.get("acme/widget"), Some("dev-feature/y"));

    let source = StubSource::default()
        .with_repository("acme/widget", Some("Widgets"), None)
        .with_commit("acme/widget", "feature/y", now() - Duration::hours(2))
        .with_pull("acme/widget", "acme:feature/y", "https://x/pull/9", 9, Some(false))
        .with_repository("acme/gizmo", Some("Gizmos"), None)
        .with_file(
            "forker/old-toolkit",
            "main",
            r#"{"name": "renamed/toolkit"}"#,
        );

    let report = generate_report(&source, &manifest, now()).await;
    let table = report.table();
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 2 + 4);
    assert_eq!(
        lines[0],
        "| Age | Package | Branch | Fork PR | Merged | Description |"
    );
    assert!(lines[2].starts_with("| 2 hours ago | [widget]"));
    assert!(lines[3].contains("[gizmo](https://github.com/acme/gizmo) | [main]"));
    assert!(lines[3].contains("| No PR | - | Gizmos |"));
    assert!(lines[4].contains("[old-toolkit](https://github.com/forker/old-toolkit)"));
    assert!(lines[4].contains("| [fix/php84]("));
    assert_eq!(
        lines[5],
        "| - | [unused-fork](https://github.com/acme/unused-fork) | - | - | - | - |"
    );

    assert_eq!(report.summary.forks_processed, 4);
    assert_eq!(report.summary.forks_matched, 3);
    assert_eq!(report.summary.forks_tracking_branch, 3);
    assert_eq!(report.summary.pull_requests_open, 1);
    assert_eq!(table, render_table(&report.rows));
}
