//! Retry configuration for the endpoint probe.

use serde::Deserialize;
use std::time::Duration;

/// How often, how patiently, and how much to capture while waiting for a
/// deployed application to start answering.
///
/// Read-only during a probe run; safe to share by reference across
/// sequential attempts.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetryPolicy {
    /// Maximum number of GET attempts before giving up.
    pub max_attempts: u32,

    /// Delay before the second attempt, in milliseconds.
    pub initial_delay_ms: u64,

    /// Multiplier applied to the delay after each failed attempt.
    /// 1.0 keeps the delay fixed.
    pub backoff_factor: f64,

    /// Upper bound on any single delay, in milliseconds.
    pub max_delay_ms: u64,

    /// Per-attempt request timeout, in seconds.
    pub attempt_timeout_secs: u64,

    /// Hard deadline for the whole probe run, in seconds. Once exceeded,
    /// no further attempts are issued regardless of `max_attempts`.
    pub overall_timeout_secs: u64,

    /// Maximum number of response body characters to capture. Longer
    /// bodies are truncated; truncation is not a failure.
    pub body_limit: usize,
}

fn default_body_limit() -> usize {
    // Legacy capture limit inherited from the fixtures this tool replaces.
    1000
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_delay_ms: 500,
            backoff_factor: 1.0,
            max_delay_ms: 5000,
            attempt_timeout_secs: 5,
            overall_timeout_secs: 30,
            body_limit: default_body_limit(),
        }
    }
}

impl RetryPolicy {
    /// Single-shot policy: one attempt, no waiting around.
    pub fn one_shot() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_secs(self.attempt_timeout_secs)
    }

    pub fn overall_timeout(&self) -> Duration {
        Duration::from_secs(self.overall_timeout_secs)
    }

    /// Delay to sleep after the given 1-based attempt fails.
    ///
    /// Attempt `n` is followed by `initial * factor^(n-1)`, capped at
    /// `max_delay_ms`.
    pub fn delay_after_attempt(&self, attempt: u32) -> Duration {
        let factor = self.backoff_factor.max(1.0);
        let scaled = self.initial_delay_ms as f64 * factor.powi(attempt.saturating_sub(1) as i32);
        let capped = scaled.min(self.max_delay_ms as f64);
        Duration::from_millis(capped as u64)
    }
}
