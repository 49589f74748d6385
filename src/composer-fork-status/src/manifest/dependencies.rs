//! Merged view of the declared dependencies.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Package identifier to version constraint, for every declared dependency.
///
/// Iteration is in key order, which makes "first candidate" matching
/// deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyMap {
    entries: BTreeMap<String, String>,
}

impl DependencyMap {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merges dependency sections in order; on a key collision the later
    /// section wins.
    ///
    /// Constraints that are not strings are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use composer_fork_status::DependencyMap;
    /// use serde_json::json;
    ///
    /// let require = json!({"a/b": "1.0"});
    /// let require_dev = json!({"a/b": "dev-x"});
    /// let map = DependencyMap::merged([
    ///     require.as_object().unwrap(),
    ///     require_dev.as_object().unwrap(),
    /// ]);
    /// assert_eq!(map.get("a/b"), Some("dev-x"));
    /// ```
    pub fn merged<'a>(sections: impl IntoIterator<Item = &'a Map<String, Value>>) -> Self {
        let mut map = Self::new();
        for section in sections {
            for (package, constraint) in section {
                if let Some(constraint) = constraint.as_str() {
                    map.insert(package.clone(), constraint.to_string());
                }
            }
        }
        map
    }

    /// Inserts a dependency, replacing any previous constraint for the package.
    pub fn insert(&mut self, package: impl Into<String>, constraint: impl Into<String>) {
        self.entries.insert(package.into(), constraint.into());
    }

    /// Returns the constraint declared for a package.
    #[must_use]
    pub fn get(&self, package: &str) -> Option<&str> {
        self.entries.get(package).map(String::as_str)
    }

    /// Returns the stored key and constraint for a package.
    #[must_use]
    pub fn get_key_value(&self, package: &str) -> Option<(&str, &str)> {
        self.entries
            .get_key_value(package)
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Iterates `(package, constraint)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Number of dependencies.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no dependencies are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for DependencyMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (package, constraint) in iter {
            map.insert(package, constraint);
        }
        map
    }
}
