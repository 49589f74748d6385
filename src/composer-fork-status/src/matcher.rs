//! Fork to dependency matching.
//!
//! Fork repository names and Composer package names drift apart (vendor
//! renames, repository renames), so a fork is resolved through a fixed list
//! of tiers, strongest first. The first tier that yields a candidate wins.

use crate::fetcher::MetadataSource;
use crate::manifest::{declared_package_name, DependencyMap, ForkEntry};
use crate::repository::GitHubRepo;
use serde::Serialize;
use tracing::{debug, info_span, Instrument};

/// Manifest file read from the fork to learn its declared package name.
pub const MANIFEST_FILE: &str = "composer.json";

/// Branches tried, in order, when reading the fork's own manifest.
pub const MANIFEST_REFS: [&str; 3] = ["main", "master", "develop"];

/// Which tier produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    /// The fork's own `composer.json` declares a required package name.
    DeclaredName,
    /// A package name segment equals the fork's display name.
    LastSegment,
    /// `owner/display_name` equals a package name.
    VendorName,
    /// A package name contains the display name.
    Substring,
    /// A package name ends with the display name.
    Suffix,
}

/// A dependency resolved for a fork.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DependencyMatch {
    /// Package identifier as declared in the manifest.
    pub package: String,

    /// Version constraint declared for the package.
    pub constraint: String,

    /// Tier that produced the match.
    pub tier: MatchTier,
}

/// Lower-cased match keys derived from a fork.
struct MatchKeys {
    owner: Option<String>,
    name: String,
}

type Tier = fn(&MatchKeys, &DependencyMap) -> Option<(String, String)>;

/// Heuristic tiers, evaluated in order after the declared-name tier.
const HEURISTIC_TIERS: [(MatchTier, Tier); 4] = [
    (MatchTier::LastSegment, by_last_segment),
    (MatchTier::VendorName, by_vendor_and_name),
    (MatchTier::Substring, by_substring),
    (MatchTier::Suffix, by_suffix),
];

/// Resolves the dependency a fork provides, reading the fork's own manifest
/// when its owner and name are known.
///
/// Failure to read the fork's manifest is not an error; matching falls back
/// to the name heuristics.
pub async fn resolve_dependency<S: MetadataSource>(
    source: &S,
    fork: &ForkEntry,
    dependencies: &DependencyMap,
) -> Option<DependencyMatch> {
    let declared = match &fork.repo {
        Some(repo) => {
            let span = info_span!("declared_name", repo = %repo);
            fetch_declared_name(source, repo).instrument(span).await
        }
        None => None,
    };

    match_dependency(fork, declared.as_deref(), dependencies)
}

/// Reads the package name the fork declares for itself.
///
/// Tries each of [`MANIFEST_REFS`] and stops at the first readable manifest.
pub async fn fetch_declared_name<S: MetadataSource>(
    source: &S,
    repo: &GitHubRepo,
) -> Option<String> {
    for reference in MANIFEST_REFS {
        match source
            .file_at_ref(&repo.owner, &repo.name, MANIFEST_FILE, reference)
            .await
        {
            Ok(contents) => {
                let name = declared_package_name(&contents);
                debug!(reference, name = ?name, "Read fork manifest");
                return name;
            }
            Err(e) => {
                debug!(reference, error = %e, "Fork manifest unavailable");
            }
        }
    }
    None
}

/// Matches a fork against the dependency map.
///
/// `declared_name` is the package name from the fork's own manifest, if known.
/// It only matches when the manifest requires exactly that package.
#[must_use]
pub fn match_dependency(
    fork: &ForkEntry,
    declared_name: Option<&str>,
    dependencies: &DependencyMap,
) -> Option<DependencyMatch> {
    if let Some((package, constraint)) =
        declared_name.and_then(|name| dependencies.get_key_value(name))
    {
        return Some(DependencyMatch {
            package: package.to_string(),
            constraint: constraint.to_string(),
            tier: MatchTier::DeclaredName,
        });
    }

    let keys = MatchKeys {
        owner: fork.owner().map(str::to_lowercase),
        name: fork.display_name.to_lowercase(),
    };

    HEURISTIC_TIERS.iter().find_map(|(tier, matches)| {
        matches(&keys, dependencies).map(|(package, constraint)| DependencyMatch {
            package,
            constraint,
            tier: *tier,
        })
    })
}

fn first_where(
    dependencies: &DependencyMap,
    predicate: impl Fn(&str) -> bool,
) -> Option<(String, String)> {
    dependencies
        .iter()
        .find(|(package, _)| predicate(package.to_lowercase().as_str()))
        .map(|(package, constraint)| (package.to_string(), constraint.to_string()))
}

fn by_last_segment(keys: &MatchKeys, dependencies: &DependencyMap) -> Option<(String, String)> {
    first_where(dependencies, |package| {
        package.rsplit('/').next() == Some(keys.name.as_str())
    })
}

fn by_vendor_and_name(keys: &MatchKeys, dependencies: &DependencyMap) -> Option<(String, String)> {
    let owner = keys.owner.as_ref()?;
    let wanted = format!("{owner}/{}", keys.name);
    first_where(dependencies, |package| package == wanted)
}

fn by_substring(keys: &MatchKeys, dependencies: &DependencyMap) -> Option<(String, String)> {
    first_where(dependencies, |package| package.contains(&keys.name))
}

fn by_suffix(keys: &MatchKeys, dependencies: &DependencyMap) -> Option<(String, String)> {
    first_where(dependencies, |package| package.ends_with(&keys.name))
}
