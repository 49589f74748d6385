//! Runner configuration.

use std::path::{Path, PathBuf};

/// Default location of the manifest, relative to the working directory.
pub const DEFAULT_MANIFEST_PATH: &str = "composer.json";

/// Default step output name.
pub const DEFAULT_OUTPUT_NAME: &str = "table";

/// Configuration for a report run.
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    /// Path to `composer.json`.
    manifest_path: PathBuf,
    /// GitHub token; anonymous access when absent.
    token: Option<String>,
    /// Name of the GitHub Actions step output receiving the table.
    output_name: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::new(PathBuf::from(DEFAULT_MANIFEST_PATH), None)
    }
}

impl RunnerConfig {
    /// Creates a new configuration for a run.
    pub fn new(manifest_path: PathBuf, token: Option<String>) -> Self {
        Self {
            manifest_path,
            token: token.filter(|t| !t.is_empty()),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }

    /// Sets a custom step output name.
    pub fn with_output_name(mut self, output_name: impl Into<String>) -> Self {
        self.output_name = output_name.into();
        self
    }

    /// Returns the manifest path.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Returns the configured GitHub token.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Returns the step output name.
    pub fn output_name(&self) -> &str {
        &self.output_name
    }
}
