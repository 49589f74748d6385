//! Composer manifest loading.
//!
//! This module reads `composer.json`, merges its dependency sections and
//! collects the forks declared as GitHub `vcs` repositories.

mod composer;
mod dependencies;
mod error;
mod fork;

pub use composer::{declared_package_name, ComposerJson, RepositoryEntry, Repositories};
pub use dependencies::DependencyMap;
pub use error::ManifestError;
pub use fork::ForkEntry;

use std::path::Path;
use tracing::{debug, info};

/// Repository kind Composer uses for version-control sources.
const VCS_KIND: &str = "vcs";

/// Host a fork must live on to be reported.
const GITHUB_HOST: &str = "github.com";

/// Everything the report needs from a manifest.
#[derive(Debug, Clone, Default)]
pub struct Manifest {
    /// Merged `require` and `require-dev` sections.
    pub dependencies: DependencyMap,

    /// GitHub forks in declaration order.
    pub forks: Vec<ForkEntry>,
}

impl Manifest {
    /// Loads and parses a `composer.json` file.
    ///
    /// # Errors
    ///
    /// Returns [`ManifestError`] if the file is missing, unreadable or not
    /// valid JSON.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        info!(path = %path.display(), "Loading manifest");

        if !path.exists() {
            return Err(ManifestError::MissingFile {
                path: path.display().to_string(),
            });
        }

        let contents = std::fs::read_to_string(path).map_err(|e| ManifestError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        let manifest = Self::parse(&contents).map_err(|e| ManifestError::JsonError {
            path: path.display().to_string(),
            source: e,
        })?;

        info!(
            dependencies = manifest.dependencies.len(),
            forks = manifest.forks.len(),
            "Loaded manifest"
        );
        Ok(manifest)
    }

    /// Parses `composer.json` contents.
    ///
    /// # Errors
    ///
    /// Returns the JSON error if the contents cannot be deserialized.
    pub fn parse(contents: &str) -> Result<Self, serde_json::Error> {
        let composer: ComposerJson = serde_json::from_str(contents)?;
        Ok(Self::from_composer(&composer))
    }

    /// Builds the report inputs from an already parsed manifest.
    #[must_use]
    pub fn from_composer(composer: &ComposerJson) -> Self {
        let dependencies = DependencyMap::merged([&composer.require, &composer.require_dev]);

        let forks = composer
            .repositories
            .entries()
            .into_iter()
            .filter(|entry| entry.kind == VCS_KIND)
            .filter_map(|entry| entry.url)
            .filter(|url| {
                let keep = url.contains(GITHUB_HOST);
                if !keep {
                    debug!(url = %url, "Skipping non-GitHub repository");
                }
                keep
            })
            .map(ForkEntry::new)
            .collect();

        Self {
            dependencies,
            forks,
        }
    }
}
