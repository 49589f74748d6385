//! Human-readable branch ages.
//!
//! Months are a fixed 30 days and years a fixed 365 days.

use chrono::{DateTime, Utc};

/// Placeholder rendered when no timestamp is known.
pub const PLACEHOLDER: &str = "-";

/// Unit name and its length in seconds, smallest first.
const UNITS: [(&str, i64); 6] = [
    ("second", 1),
    ("minute", 60),
    ("hour", 3_600),
    ("day", 86_400),
    ("month", 2_592_000),
    ("year", 31_536_000),
];

/// Formats the time elapsed between `then` and `now`.
///
/// Returns [`PLACEHOLDER`] when `then` is `None`. Timestamps in the future
/// are reported as `0 seconds ago`.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, Utc};
/// use composer_fork_status::relative_time;
///
/// let now = Utc::now();
/// assert_eq!(relative_time(Some(now - Duration::days(2)), now), "2 days ago");
/// assert_eq!(relative_time(None, now), "-");
/// ```
#[must_use]
pub fn relative_time(then: Option<DateTime<Utc>>, now: DateTime<Utc>) -> String {
    match then {
        Some(then) => format_elapsed((now - then).num_seconds()),
        None => PLACEHOLDER.to_string(),
    }
}

/// Formats a number of elapsed seconds as `"<n> <unit>(s) ago"`.
#[must_use]
pub fn format_elapsed(seconds: i64) -> String {
    let seconds = seconds.max(0);

    // The coarsest unit whose length does not exceed the elapsed time.
    let (unit, length) = UNITS
        .iter()
        .rev()
        .find(|(_, length)| seconds >= *length)
        .copied()
        .unwrap_or(UNITS[0]);

    let count = seconds / length;
    let plural = if count == 1 { "" } else { "s" };
    format!("{count} {unit}{plural} ago")
}
