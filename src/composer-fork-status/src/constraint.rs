//! Branch extraction from Composer version constraints.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Prefix Composer uses for constraints that track a branch head.
const DEV_PREFIX: &str = "dev-";

/// Separator of an inline alias, e.g. `dev-main as 1.2.x`.
const ALIAS_SEPARATOR: &str = " as ";

/// Characters left untouched when a branch is used as a single path segment.
/// Everything else, `/` included, is percent-encoded.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~')
    .remove(b'!')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'*');

/// Returns the branch a constraint tracks, or `None` when it does not track one.
///
/// # Examples
///
/// ```
/// use composer_fork_status::parse_branch;
///
/// assert_eq!(parse_branch("dev-main").as_deref(), Some("main"));
/// assert_eq!(parse_branch("dev-feature/x as 1.2.x").as_deref(), Some("feature/x"));
/// assert_eq!(parse_branch("^1.0"), None);
/// ```
#[must_use]
pub fn parse_branch(constraint: &str) -> Option<String> {
    let rest = constraint.strip_prefix(DEV_PREFIX)?;
    let branch = match rest.find(ALIAS_SEPARATOR) {
        Some(end) => &rest[..end],
        None => rest,
    };
    Some(branch.to_string())
}

/// Percent-encodes a branch name as one URL path segment (`feature/x` -> `feature%2Fx`).
#[must_use]
pub fn encode_branch(branch: &str) -> String {
    utf8_percent_encode(branch, SEGMENT).to_string()
}
