//! Raw `composer.json` deserialization.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::{Map, Value};

/// The parts of a `composer.json` file this tool reads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ComposerJson {
    /// Package name declared by the manifest itself (`vendor/name`).
    pub name: Option<String>,

    /// Production dependencies.
    #[serde(default, deserialize_with = "dependency_section")]
    pub require: Map<String, Value>,

    /// Development dependencies.
    #[serde(default, deserialize_with = "dependency_section")]
    pub require_dev: Map<String, Value>,

    /// Custom package repositories.
    #[serde(default)]
    pub repositories: Repositories,
}

/// Reads a dependency section, accepting `[]` for an empty one as PHP's
/// `json_encode` writes it.
fn dependency_section<'de, D>(deserializer: D) -> Result<Map<String, Value>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Section {
        Map(Map<String, Value>),
        List(Vec<Value>),
    }

    match Section::deserialize(deserializer)? {
        Section::Map(map) => Ok(map),
        Section::List(list) if list.is_empty() => Ok(Map::new()),
        Section::List(_) => Err(D::Error::custom("expected a map of package constraints")),
    }
}

/// Composer accepts `repositories` either as a list or as an object keyed by name.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Repositories {
    /// `"repositories": [ {...}, {...} ]`
    List(Vec<Value>),
    /// `"repositories": { "name": {...} }`
    Named(Map<String, Value>),
}

impl Default for Repositories {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl Repositories {
    /// Returns the well-formed repository objects. List entries keep their
    /// declaration order; named entries come back in key order.
    pub fn entries(&self) -> Vec<RepositoryEntry> {
        let values: Vec<&Value> = match self {
            Self::List(list) => list.iter().collect(),
            Self::Named(map) => map.values().collect(),
        };
        values
            .into_iter()
            .filter_map(|value| RepositoryEntry::deserialize(value).ok())
            .collect()
    }
}

/// One entry of the `repositories` section.
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryEntry {
    /// Repository kind (`vcs`, `path`, `composer`, ...).
    #[serde(rename = "type")]
    pub kind: String,

    /// Location of the repository.
    pub url: Option<String>,
}

/// Reads the package name out of a `composer.json` document.
///
/// Only `name` is read, so the rest of the document may take any shape.
/// Returns `None` when the document is not valid JSON or declares no name.
#[must_use]
pub fn declared_package_name(contents: &str) -> Option<String> {
    let document: Value = serde_json::from_str(contents).ok()?;
    document
        .get("name")?
        .as_str()
        .filter(|name| !name.is_empty())
        .map(str::to_string)
}
