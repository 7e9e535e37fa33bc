//! Process-wide call pacing for the upstream free-tier quota.

use std::num::NonZeroU32;
use std::time::Duration;

use governor::clock::DefaultClock;
use governor::state::direct::NotKeyed;
use governor::state::InMemoryState;
use governor::{Quota, RateLimiter};

type DirectRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Pacing gate shared by every endpoint fetch in a run.
///
/// [`RateGate::acquire`] suspends the calling task until the configured
/// interval has elapsed since the last grant. Burst size is 1, so grants are
/// never dispatched closer together than the interval regardless of how many
/// tasks share the gate.
pub struct RateGate {
    limiter: DirectRateLimiter,
    interval: Duration,
}

impl RateGate {
    /// Gate with interval `60s / max(1, calls_per_minute)`.
    pub fn per_minute(calls_per_minute: u32) -> Self {
        let interval = Duration::from_secs_f64(60.0 / f64::from(calls_per_minute.max(1)));
        Self::with_interval(interval)
    }

    pub fn with_interval(interval: Duration) -> Self {
        let period = interval.max(Duration::from_millis(1));
        let quota = Quota::with_period(period)
            .expect("pacing interval is always greater than zero")
            .allow_burst(NonZeroU32::MIN);
        Self {
            limiter: RateLimiter::direct(quota),
            interval: period,
        }
    }

    pub const fn interval(&self) -> Duration {
        self.interval
    }

    /// Waits until the quota grants another call, then records the grant.
    pub async fn acquire(&self) {
        self.limiter.until_ready().await;
    }
}
