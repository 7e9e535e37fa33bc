//! Backoff schedules for the retry loop.
//!
//! All schedules are attempt-scaled and capped: `min(cap, step * attempt)`.
//! The math is pure so policies are testable without sleeping; the fetch loop
//! owns the actual `tokio::time::sleep` calls.

use std::time::Duration;

/// Capped attempt-scaled backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Backoff {
    pub step: Duration,
    pub cap: Duration,
}

impl Backoff {
    /// Transport failures and non-200 statuses.
    pub const TRANSPORT: Self = Self::new(Duration::from_secs(2), Duration::from_secs(30));

    /// Upstream soft-throttle notes.
    pub const THROTTLE: Self = Self::new(Duration::from_secs(15), Duration::from_secs(60));

    /// Soft-throttle schedule used by the news endpoint.
    pub const THROTTLE_NEWS: Self = Self::new(Duration::from_secs(10), Duration::from_secs(75));

    /// Well-formed responses that lack the expected payload.
    pub const SOFT: Self = Self::new(Duration::from_secs(2), Duration::from_secs(60));

    pub const fn new(step: Duration, cap: Duration) -> Self {
        Self { step, cap }
    }

    /// Delay before the next attempt; `attempt` is 1-based.
    pub fn delay(self, attempt: u32) -> Duration {
        self.step.saturating_mul(attempt).min(self.cap)
    }
}

/// Retry budget and backoff schedule for one fetch call.
///
/// The soft-throttle schedule is not here: it varies per endpoint and lives
/// on [`EndpointSpec`](crate::endpoint::EndpointSpec).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPolicy {
    /// Total attempts before the endpoint fails with `ExhaustedRetries`.
    pub max_retries: u32,
    /// Per-request transport timeout.
    pub timeout: Duration,
    /// Schedule for transport failures, non-200 statuses, and undecodable bodies.
    pub transport_backoff: Backoff,
    /// Schedule for well-formed responses missing the success marker.
    pub shape_backoff: Backoff,
}

impl Default for FetchPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            timeout: Duration::from_secs(20),
            transport_backoff: Backoff::TRANSPORT,
            shape_backoff: Backoff::SOFT,
        }
    }
}
