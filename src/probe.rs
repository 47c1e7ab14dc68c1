//! Endpoint probe: one logical HTTP GET with retry while the server starts.
//!
//! The probe blocks the calling thread for the duration of its retries.
//! Deployment verification is short-lived and one-shot, so a plain polling
//! loop is the whole concurrency story; the overall timeout is the hard
//! cancellation boundary.

use std::time::Instant;

use crate::error::ProbeError;
use crate::models::{ProbeOutcome, ProbeResult, RetryPolicy, Target};

/// Issues GET requests against a [`Target`] and classifies the outcome.
///
/// Transient failures (connection refused/reset, per-attempt timeout, 5xx)
/// are retried per the policy's backoff schedule. Any other non-2xx answer
/// means the server is up and routing, so it is reported immediately.
pub struct EndpointProbe {
    client: reqwest::blocking::Client,
    policy: RetryPolicy,
}

/// Most recent transient failure, used to classify the final outcome once
/// retries are exhausted.
enum LastFailure {
    Connect,
    AttemptTimeout,
    ServerError(ProbeResult),
}

impl EndpointProbe {
    pub fn new(policy: RetryPolicy) -> Result<Self, ProbeError> {
        if policy.max_attempts == 0 {
            return Err(ProbeError::ZeroAttempts);
        }

        // Redirects are not followed: a redirect is a real answer from a
        // live server and must surface as UnexpectedStatus.
        let client = reqwest::blocking::Client::builder()
            .timeout(policy.attempt_timeout())
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self { client, policy })
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    /// Run the probe against `target`.
    ///
    /// Returns on the first 2xx response. Otherwise retries transient
    /// failures until `max_attempts` or the overall timeout, whichever
    /// comes first. Each attempt's connection is consumed or dropped
    /// before the next attempt begins.
    pub fn probe(&self, target: &Target) -> ProbeOutcome {
        let started = Instant::now();
        let overall = self.policy.overall_timeout();
        let mut attempts = 0u32;
        let mut last = LastFailure::Connect;

        loop {
            attempts += 1;
            let attempt_started = Instant::now();

            match self.client.get(target.url().clone()).send() {
                Ok(response) => {
                    let status = response.status().as_u16();
                    match response.text() {
                        Ok(body) => {
                            let result = ProbeResult::new(
                                status,
                                body,
                                attempt_started.elapsed(),
                                self.policy.body_limit,
                            );
                            if result.is_success() {
                                tracing::info!(
                                    target = %target,
                                    status,
                                    attempt = attempts,
                                    elapsed_ms = result.elapsed.as_millis() as u64,
                                    "Probe succeeded"
                                );
                                return ProbeOutcome::Success(result);
                            }
                            if (500..600).contains(&status) {
                                tracing::debug!(
                                    target = %target,
                                    status,
                                    attempt = attempts,
                                    "Server error, will retry"
                                );
                                last = LastFailure::ServerError(result);
                            } else {
                                tracing::debug!(
                                    target = %target,
                                    status,
                                    attempt = attempts,
                                    "Non-transient status, giving up"
                                );
                                return ProbeOutcome::UnexpectedStatus { result, attempts };
                            }
                        }
                        Err(e) => {
                            // Body cut off mid-stream counts as a reset.
                            tracing::debug!(
                                target = %target,
                                attempt = attempts,
                                error = %e,
                                "Response body read failed, will retry"
                            );
                            last = LastFailure::Connect;
                        }
                    }
                }
                Err(e) => {
                    last = if e.is_timeout() {
                        LastFailure::AttemptTimeout
                    } else {
                        LastFailure::Connect
                    };
                    tracing::debug!(
                        target = %target,
                        attempt = attempts,
                        error = %e,
                        "Connection attempt failed, will retry"
                    );
                }
            }

            if attempts >= self.policy.max_attempts {
                break;
            }

            // Never enter a sleep that would cross the overall deadline.
            let delay = self.policy.delay_after_attempt(attempts);
            if started.elapsed() + delay >= overall {
                let elapsed = started.elapsed();
                tracing::warn!(
                    target = %target,
                    attempts,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Probe deadline exceeded"
                );
                return match last {
                    LastFailure::ServerError(result) => {
                        ProbeOutcome::UnexpectedStatus { result, attempts }
                    }
                    _ => ProbeOutcome::Timeout { attempts, elapsed },
                };
            }
            std::thread::sleep(delay);
        }

        let elapsed = started.elapsed();
        tracing::warn!(
            target = %target,
            attempts,
            elapsed_ms = elapsed.as_millis() as u64,
            "Probe exhausted its attempts"
        );
        match last {
            LastFailure::ServerError(result) => ProbeOutcome::UnexpectedStatus { result, attempts },
            LastFailure::AttemptTimeout => ProbeOutcome::Timeout { attempts, elapsed },
            LastFailure::Connect => {
                if elapsed >= overall {
                    ProbeOutcome::Timeout { attempts, elapsed }
                } else {
                    ProbeOutcome::ConnectionRefused { attempts, elapsed }
                }
            }
        }
    }
}
