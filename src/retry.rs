//! Backoff policy for throttled image downloads.

use reqwest::StatusCode;
use std::time::Duration;

/// How a download attempt ended, for retry purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptOutcome {
    Success,
    /// Server asked us to slow down (403, 429).
    Throttled,
    /// Anything else; never retried.
    Failed,
}

impl AttemptOutcome {
    pub fn from_status(status: StatusCode) -> Self {
        match status.as_u16() {
            200..=299 => AttemptOutcome::Success,
            403 | 429 => AttemptOutcome::Throttled,
            _ => AttemptOutcome::Failed,
        }
    }
}

/// Exponential backoff: `base_delay * 2^(attempt-1)`.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Maximum number of attempts (including the first).
    pub max_attempts: u32,
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Delay to wait after a throttled `attempt` (1-based), or `None` once the
    /// attempts are used up.
    pub fn backoff(&self, attempt: u32) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        Some(self.base_delay.saturating_mul(factor))
    }
}
