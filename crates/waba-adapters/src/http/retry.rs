//! Exponential backoff for transient API failures.
//!
//! Backoff doubles with each retry up to `max_backoff_ms`:
//! 500ms → 1s → 2s → 4s → 8s (max).
//!
//! # Retry Decision
//! - Retry on: 429, 500, 502, 503, 504, network errors
//! - Do NOT retry: other 4xx, malformed bodies

use std::time::Duration;

use waba_core::application::ClientError;

/// Retry policy with exponential backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of retries after the first attempt. Zero disables
    /// retrying.
    pub max_retries: u32,

    /// Initial backoff duration in milliseconds
    pub initial_backoff_ms: u64,

    /// Maximum backoff duration in milliseconds
    pub max_backoff_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            initial_backoff_ms: 500,
            max_backoff_ms: 8_000,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, initial_backoff_ms: u64, max_backoff_ms: u64) -> Self {
        Self {
            max_retries,
            initial_backoff_ms,
            max_backoff_ms: max_backoff_ms.max(initial_backoff_ms),
        }
    }

    /// Delay before retry number `attempt` (zero-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u64.checked_shl(attempt).unwrap_or(u64::MAX);
        let ms = self
            .initial_backoff_ms
            .saturating_mul(factor)
            .min(self.max_backoff_ms);
        Duration::from_millis(ms)
    }

    /// Whether `err` after `attempt` retries should be tried again.
    pub fn should_retry(&self, err: &ClientError, attempt: u32) -> bool {
        attempt < self.max_retries && matches!(err, ClientError::Api(api) if api.is_retryable())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waba_core::application::ApiError;

    #[test]
    fn backoff_doubles_until_cap() {
        let policy = RetryPolicy::new(5, 500, 4_000);
        let delays: Vec<_> = (0..6).map(|a| policy.backoff(a).as_millis()).collect();
        assert_eq!(delays, [500, 1_000, 2_000, 4_000, 4_000, 4_000]);
    }

    #[test]
    fn huge_attempt_does_not_overflow() {
        let policy = RetryPolicy::new(3, 500, 8_000);
        assert_eq!(policy.backoff(200), Duration::from_millis(8_000));
    }

    #[test]
    fn retries_only_transient_api_errors() {
        let policy = RetryPolicy::new(2, 1, 1);
        let throttled = ClientError::Api(ApiError::new("4", "throttled").with_status(429));
        let rejected = ClientError::Api(ApiError::new("100", "bad").with_status(400));
        let network = ClientError::Api(ApiError::network("connection reset"));

        assert!(policy.should_retry(&throttled, 0));
        assert!(policy.should_retry(&network, 1));
        assert!(!policy.should_retry(&throttled, 2));
        assert!(!policy.should_retry(&rejected, 0));
    }

    #[test]
    fn default_never_retries() {
        let err = ClientError::Api(ApiError::network("down"));
        assert!(!RetryPolicy::default().should_retry(&err, 0));
    }
}
