//! Orchestrates a fork status report.

mod config;
mod error;

pub use config::{RunnerConfig, DEFAULT_MANIFEST_PATH, DEFAULT_OUTPUT_NAME};
pub use error::RunnerError;

use crate::fetcher::{GitHubFetcher, MetadataSource};
use crate::manifest::Manifest;
use crate::output::ActionsOutput;
use crate::report::{collect_status, render_table, StatusRow};
use crate::summary::RunSummary;
use chrono::{DateTime, Utc};
use tracing::{info, warn};

/// Result of a complete run.
#[derive(Debug, Clone)]
pub struct Report {
    /// One row per fork, in manifest order.
    pub rows: Vec<StatusRow>,
    /// Counts gathered over the run.
    pub summary: RunSummary,
}

impl Report {
    /// Renders the markdown table.
    #[must_use]
    pub fn table(&self) -> String {
        render_table(&self.rows)
    }
}

/// Orchestrates a full report run against GitHub.
pub struct Runner {
    config: RunnerConfig,
    fetcher: GitHubFetcher,
}

impl Runner {
    /// Builds a runner from the provided configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the GitHub client cannot be constructed.
    pub fn new(config: RunnerConfig) -> Result<Self, RunnerError> {
        if config.token().is_none() {
            warn!("No GitHub token configured, requests are subject to anonymous rate limits");
        }
        let fetcher = GitHubFetcher::from_token(config.token())?;
        Ok(Self { config, fetcher })
    }

    /// Returns the runner configuration.
    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Loads the manifest and reports on every fork.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Manifest`] if the manifest cannot be loaded.
    /// Per-fork lookup failures never abort the run.
    pub async fn run(&self) -> Result<Report, RunnerError> {
        let manifest = Manifest::load(self.config.manifest_path())?;
        Ok(generate_report(&self.fetcher, &manifest, Utc::now()).await)
    }

    /// Writes the table to the GitHub Actions step output and job summary,
    /// when running inside a workflow.
    ///
    /// # Errors
    ///
    /// Returns [`RunnerError::Output`] if a sink file cannot be written.
    pub fn deliver(&self, report: &Report) -> Result<(), RunnerError> {
        ActionsOutput::from_env().deliver(self.config.output_name(), &report.table())?;
        Ok(())
    }
}

/// Reports on every fork of a manifest, one at a time, in declaration order.
pub async fn generate_report<S: MetadataSource>(
    source: &S,
    manifest: &Manifest,
    now: DateTime<Utc>,
) -> Report {
    let mut summary = RunSummary::new();
    let mut rows = Vec::with_capacity(manifest.forks.len());

    if manifest.forks.is_empty() {
        warn!("No GitHub forks declared in manifest");
    }

    for (i, fork) in manifest.forks.iter().enumerate() {
        info!(
            fork = %fork.url,
            progress = %format!("{}/{}", i + 1, manifest.forks.len()),
            "Processing fork"
        );
        source.throttle().await;

        let status = collect_status(source, fork, &manifest.dependencies).await;
        summary.record(&status);
        rows.push(status.to_row(now));
    }

    info!(
        forks = summary.forks_processed,
        matched = summary.forks_matched,
        open_prs = summary.pull_requests_open,
        "Report complete"
    );
    Report { rows, summary }
}
