//! GitHub core API rate limit handling.
//!
//! Each fork costs up to eight core API requests, which quickly exhausts the
//! anonymous allowance. Before each fork the runner checks the remaining
//! budget and sleeps until the window resets when it runs low.

use octocrab::Octocrab;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::{info, warn};

/// Maximum time to wait for rate limit reset (1 hour).
const MAX_WAIT_SECS: u64 = 3600;

/// Minimum remaining requests before proactively waiting.
const MIN_REMAINING_THRESHOLD: u32 = 5;

/// Core API rate limit state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitInfo {
    /// Requests remaining in the current window.
    pub remaining: u32,
    /// Unix timestamp when the rate limit resets.
    pub reset: u64,
    /// Total requests allowed per window.
    pub limit: u32,
}

impl RateLimitInfo {
    /// Returns true when fewer than the threshold of requests remain.
    #[must_use]
    pub fn is_low(&self) -> bool {
        self.remaining < MIN_REMAINING_THRESHOLD
    }

    /// Seconds to sleep before the window resets, capped at one hour.
    ///
    /// Returns `None` when no wait is needed.
    #[must_use]
    pub fn wait_secs(&self, now: u64) -> Option<u64> {
        if !self.is_low() || self.reset <= now {
            return None;
        }

        let wait_secs = self.reset - now;
        if wait_secs > MAX_WAIT_SECS {
            warn!(
                wait_secs,
                max_wait = MAX_WAIT_SECS,
                "Rate limit reset too far in future, capping wait time"
            );
        }
        Some(wait_secs.min(MAX_WAIT_SECS))
    }
}

/// Checks the current rate limit status for the core API.
///
/// # Errors
///
/// Returns an error if the rate limit API call fails.
pub async fn check_core_rate_limit(octocrab: &Octocrab) -> Result<RateLimitInfo, octocrab::Error> {
    let rate_limit = octocrab.ratelimit().get().await?;
    let core = &rate_limit.resources.core;

    Ok(RateLimitInfo {
        remaining: core.remaining as u32,
        reset: core.reset,
        limit: core.limit as u32,
    })
}

/// Sleeps until the rate limit window resets if the budget is low.
///
/// Returns `true` if we waited.
pub async fn wait_if_needed(info: &RateLimitInfo) -> bool {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();

    let Some(wait_secs) = info.wait_secs(now) else {
        return false;
    };

    info!(
        remaining = info.remaining,
        limit = info.limit,
        wait_secs,
        "Rate limit low, waiting for reset"
    );
    tokio::time::sleep(Duration::from_secs(wait_secs)).await;
    true
}

/// Waits for core API capacity when needed.
///
/// A failing rate limit check is logged and otherwise ignored, since the
/// report degrades per field anyway.
pub async fn ensure_core_rate_limit(octocrab: &Octocrab) {
    match check_core_rate_limit(octocrab).await {
        Ok(info) => {
            wait_if_needed(&info).await;
        }
        Err(e) => warn!(error = %e, "Failed to check rate limit"),
    }
}
