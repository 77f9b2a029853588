use governor::{DefaultDirectRateLimiter, Quota};
use std::time::Duration;
use tracing::debug;

/// Spaces successive geocoding requests at least `min_delay` apart.
///
/// A zero delay disables throttling.
pub struct RequestThrottle {
    limiter: Option<DefaultDirectRateLimiter>,
    min_delay: Duration,
}

impl RequestThrottle {
    pub fn new(min_delay: Duration) -> Self {
        // One permit per period, no burst
        let limiter = Quota::with_period(min_delay).map(DefaultDirectRateLimiter::direct);
        Self { limiter, min_delay }
    }

    pub fn min_delay(&self) -> Duration {
        self.min_delay
    }

    /// Wait for permission to send the next request
    pub async fn wait(&self) {
        if let Some(limiter) = &self.limiter {
            if limiter.check().is_err() {
                debug!("Rate limiting: waiting up to {:?}", self.min_delay);
                limiter.until_ready().await;
            }
        }
    }
}
