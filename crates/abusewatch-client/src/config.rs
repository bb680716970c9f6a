//! Client retry configuration.

use std::time::Duration;

/// Retry configuration for failed check-block requests
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of attempts, inclusive of the first
    pub max_retries: u32,

    /// Unit of the linear backoff; attempt `n` waits `n * backoff_unit`
    pub backoff_unit: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_unit: Duration::from_secs(1),
        }
    }
}

impl RetryConfig {
    /// Create a retry configuration with the default 3 attempts and 1s unit
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_retries: 3,
            backoff_unit: Duration::from_secs(1),
        }
    }

    /// Set the maximum number of attempts
    #[must_use]
    pub const fn max_retries(mut self, max: u32) -> Self {
        self.max_retries = max;
        self
    }

    /// Set the backoff unit
    #[must_use]
    pub const fn backoff_unit(mut self, unit: Duration) -> Self {
        self.backoff_unit = unit;
        self
    }

    /// Backoff to wait before retrying after the given attempt (1-indexed)
    #[must_use]
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        self.backoff_unit * attempt
    }
}
