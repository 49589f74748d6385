#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

pub mod age;
pub mod constraint;
pub mod fetcher;
pub mod manifest;
pub mod matcher;
pub mod output;
pub mod rate_limit;
pub mod report;
pub mod repository;
pub mod runner;
pub mod summary;

pub use age::{format_elapsed, relative_time};
pub use constraint::{encode_branch, parse_branch};
pub use fetcher::{
    CommitInfo, FetchError, GitHubFetcher, MetadataSource, PullRequestRef, RepositoryInfo,
};
pub use manifest::{DependencyMap, ForkEntry, Manifest, ManifestError};
pub use matcher::{match_dependency, resolve_dependency, DependencyMatch, MatchTier};
pub use output::{format_output, ActionsOutput, OutputError};
pub use rate_limit::{check_core_rate_limit, ensure_core_rate_limit, wait_if_needed, RateLimitInfo};
pub use report::{
    build_row, collect_status, render_table, ForkStatus, PullRequestStatus, StatusRow,
};
pub use repository::{canonical_url, display_name, GitHubRepo};
pub use runner::{generate_report, Report, Runner, RunnerConfig, RunnerError};
pub use summary::RunSummary;
