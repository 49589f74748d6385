//! Delivery of the rendered table to GitHub Actions.
//!
//! Inside a workflow, `GITHUB_OUTPUT` names a file collecting step outputs and
//! `GITHUB_STEP_SUMMARY` a markdown file shown on the run page. Outside of
//! Actions neither is set and nothing is written.

mod error;

pub use error::OutputError;

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming the step output file.
pub const GITHUB_OUTPUT_ENV: &str = "GITHUB_OUTPUT";

/// Environment variable naming the job summary file.
pub const GITHUB_STEP_SUMMARY_ENV: &str = "GITHUB_STEP_SUMMARY";

/// Prefix of the heredoc delimiter used for multi-line outputs.
const DELIMITER_PREFIX: &str = "COMPOSER_FORK_STATUS_EOF";

/// Where the table goes besides stdout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionsOutput {
    /// Step output file, if any.
    pub output_file: Option<PathBuf>,
    /// Job summary file, if any.
    pub summary_file: Option<PathBuf>,
}

impl ActionsOutput {
    /// Reads the sink locations from the environment.
    #[must_use]
    pub fn from_env() -> Self {
        let path = |name: &str| {
            std::env::var_os(name)
                .filter(|value| !value.is_empty())
                .map(PathBuf::from)
        };
        Self {
            output_file: path(GITHUB_OUTPUT_ENV),
            summary_file: path(GITHUB_STEP_SUMMARY_ENV),
        }
    }

    /// Writes the table to every configured sink.
    ///
    /// # Errors
    ///
    /// Returns [`OutputError`] if a sink file cannot be appended to.
    pub fn deliver(&self, name: &str, table: &str) -> Result<(), OutputError> {
        match &self.output_file {
            Some(path) => {
                append(path, &format_output(name, table))?;
                info!(path = %path.display(), name, "Wrote step output");
            }
            None => debug!("{GITHUB_OUTPUT_ENV} not set, skipping step output"),
        }

        if let Some(path) = &self.summary_file {
            append(path, &format!("{table}\n"))?;
            info!(path = %path.display(), "Wrote job summary");
        }

        Ok(())
    }
}

/// Formats a multi-line step output entry.
///
/// The delimiter is extended until it does not occur in the value.
#[must_use]
pub fn format_output(name: &str, value: &str) -> String {
    let mut delimiter = DELIMITER_PREFIX.to_string();
    while value.lines().any(|line| line == delimiter) {
        delimiter.push('_');
    }
    format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
}

fn append(path: &Path, contents: &str) -> Result<(), OutputError> {
    let to_error = |e| OutputError::IoError {
        path: path.display().to_string(),
        source: e,
    };

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(to_error)?;
    file.write_all(contents.as_bytes()).map_err(to_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn formats_multiline_output() {
        assert_eq!(
            format_output("table", "a\nb"),
            "table<<COMPOSER_FORK_STATUS_EOF\na\nb\nCOMPOSER_FORK_STATUS_EOF\n"
        );
    }

    #[test]
    fn delimiter_avoids_collisions() {
        let output = format_output("table", "COMPOSER_FORK_STATUS_EOF");
        assert!(output.starts_with("table<<COMPOSER_FORK_STATUS_EOF_\n"));
    }

    #[test]
    fn reads_sinks_from_environment() {
        temp_env::with_vars(
            [
                (GITHUB_OUTPUT_ENV, Some("/tmp/out")),
                (GITHUB_STEP_SUMMARY_ENV, Some("")),
            ],
            || {
                let output = ActionsOutput::from_env();
                assert_eq!(output.output_file, Some(PathBuf::from("/tmp/out")));
                assert_eq!(output.summary_file, None);
            },
        );
    }

    #[test]
    fn appends_to_existing_files() {
        let temp = TempDir::new().unwrap();
        let output_file = temp.path().join("output");
        let summary_file = temp.path().join("summary");
        fs::write(&output_file, "previous=1\n").unwrap();

        let output = ActionsOutput {
            output_file: Some(output_file.clone()),
            summary_file: Some(summary_file.clone()),
        };
        output.deliver("table", "| a |").unwrap();

        assert_eq!(
            fs::read_to_string(&output_file).unwrap(),
            "previous=1\ntable<<COMPOSER_FORK_STATUS_EOF\n| a |\nCOMPOSER_FORK_STATUS_EOF\n"
        );
        assert_eq!(fs::read_to_string(&summary_file).unwrap(), "| a |\n");
    }

    #[test]
    fn no_sinks_is_a_no_op() {
        ActionsOutput::default().deliver("table", "| a |").unwrap();
    }

    #[test]
    fn unwritable_sink_is_an_error() {
        let temp = TempDir::new().unwrap();
        let output = ActionsOutput {
            output_file: Some(temp.path().join("missing/dir/output")),
            summary_file: None,
        };
        assert!(matches!(
            output.deliver("table", "x"),
            Err(OutputError::IoError { .. })
        ));
    }
}
