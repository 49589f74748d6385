//! CLI for the Composer fork status report.
//!
//! Loads `composer.json`, reports on every declared GitHub fork and prints
//! the resulting markdown table.

use clap::Parser;
use composer_fork_status::{Report, RunSummary, Runner, RunnerConfig, RunnerError};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Composer Fork Status - Report branch age, upstream PRs and merge state of forked dependencies.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to composer.json.
    #[arg(long, env = "COMPOSER_JSON_PATH", default_value = "composer.json")]
    manifest: PathBuf,

    /// GitHub Personal Access Token (optional, raises rate limits).
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Enable debug logging.
    #[arg(long, env = "DEBUG")]
    debug: bool,

    /// Name of the GitHub Actions step output receiving the table.
    #[arg(long, default_value = "table")]
    output_name: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Parse arguments
    let args = Args::parse();

    // Initialize tracing
    init_tracing(args.debug);

    // Use aws-lc-rs for TLS regardless of which providers the dependency tree enables
    let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();

    // Run the main logic
    match run(args).await {
        Ok(summary) => {
            print_summary(&summary);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Critical failure");
            ExitCode::from(2)
        }
    }
}

/// Initializes tracing with environment filter support.
///
/// Logs go to stderr so stdout carries only the table. `RUST_LOG` takes
/// precedence; otherwise the level is "info", or "debug" with `--debug`.
fn init_tracing(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();
}

/// Main execution logic.
async fn run(args: Args) -> Result<RunSummary, RunnerError> {
    let config = RunnerConfig::new(args.manifest, args.token).with_output_name(args.output_name);
    let runner = Runner::new(config)?;
    let report = runner.run().await?;

    print_table(&report);
    runner.deliver(&report)?;
    Ok(report.summary)
}

/// Prints the table to stdout.
fn print_table(report: &Report) {
    println!("{}", report.table());
}

/// Prints the final run summary.
fn print_summary(summary: &RunSummary) {
    eprintln!("\nSummary:");
    eprintln!("  Forks processed: {}", summary.forks_processed);
    eprintln!("  Forks matched: {}", summary.forks_matched);
    eprintln!("  Forks tracking a branch: {}", summary.forks_tracking_branch);
    if summary.forks_unresolved > 0 {
        eprintln!("  Unrecognised fork URLs: {}", summary.forks_unresolved);
    }
    eprintln!("  Open pull requests: {}", summary.pull_requests_open);
    eprintln!("  Merged pull requests: {}", summary.pull_requests_merged);
    if summary.pull_requests_unknown > 0 {
        eprintln!("  Failed pull request lookups: {}", summary.pull_requests_unknown);
    }
}
