//! Transient remote error retry logic.
//!
//! Remote libSQL servers occasionally reject statements while a node is
//! being recycled or provisioned. These surface as errors that resolve on
//! their own within seconds, so remote calls are retried with exponential
//! backoff. Local databases never retry.

use std::time::Duration;

/// Retry behaviour for transient remote errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryConfig {
    /// Maximum number of attempts (including the initial one).
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub base_delay: Duration,
    /// Backoff cap.
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            base_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(2),
        }
    }
}

impl RetryConfig {
    #[must_use]
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// Delay before retry number `attempt` (1-based), doubled each time and
    /// capped at `max_delay`.
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |d| d.min(self.max_delay))
    }
}

/// Detect transient remote infrastructure errors.
///
/// The predicate is narrow so that SQL and constraint errors are never
/// retried.
#[must_use]
pub fn is_transient_remote_error(e: &libsql::Error) -> bool {
    let msg = e.to_string().to_ascii_lowercase();
    msg.contains("unable to acquire shared lock")
        || msg.contains("deletion must be in progress")
        || msg.contains("stream not found")
        || msg.contains("connection reset")
}
