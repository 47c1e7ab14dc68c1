//! Verification harness: turns probe outcomes into pass/fail verdicts.

use std::fmt;

use crate::error::{HarnessError, VerifyError};
use crate::models::{ProbeOutcome, ProbeResult, RetryPolicy, ServerConfig, Target};
use crate::probe::EndpointProbe;

/// What a response body must look like for a verification to pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BodyExpectation {
    /// Any body passes.
    Any,
    /// Body must equal the given text exactly.
    Exact(String),
    /// Body must contain the given substring.
    Contains(String),
}

impl BodyExpectation {
    pub fn matches(&self, body: &str) -> bool {
        match self {
            BodyExpectation::Any => true,
            BodyExpectation::Exact(expected) => body == expected,
            BodyExpectation::Contains(needle) => body.contains(needle),
        }
    }
}

impl fmt::Display for BodyExpectation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BodyExpectation::Any => write!(f, "any body"),
            BodyExpectation::Exact(expected) => write!(f, "body equal to {expected:?}"),
            BodyExpectation::Contains(needle) => write!(f, "body containing {needle:?}"),
        }
    }
}

/// Expected outcome of one verification: a status code and a body predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Expectation {
    pub status: u16,
    pub body: BodyExpectation,
}

impl Expectation {
    /// Expect the given status with any body.
    pub fn status(status: u16) -> Self {
        Self {
            status,
            body: BodyExpectation::Any,
        }
    }

    /// Expect HTTP 200 with any body.
    pub fn ok() -> Self {
        Self::status(200)
    }

    pub fn with_body_equals(mut self, body: impl Into<String>) -> Self {
        self.body = BodyExpectation::Exact(body.into());
        self
    }

    pub fn with_body_contains(mut self, needle: impl Into<String>) -> Self {
        self.body = BodyExpectation::Contains(needle.into());
        self
    }
}

/// Drives the [`EndpointProbe`] against expected outcomes.
///
/// Built once per suite (the `setup` step); each call to [`verify`] is one
/// discrete, independently reportable test verdict. The harness performs no
/// retries of its own beyond what the probe already does, and assertion
/// mismatches are never retried.
///
/// [`verify`]: VerificationHarness::verify
pub struct VerificationHarness {
    target: Target,
    probe: EndpointProbe,
}

impl VerificationHarness {
    /// Suite setup: resolve the target from collaborator-provided config
    /// and build the probe. Any failure here is fatal to the whole suite.
    pub fn from_config(config: &ServerConfig) -> Result<Self, HarnessError> {
        let target = config.target()?;
        Self::new(target, config.retry.clone())
    }

    /// Build a harness for a target the caller already resolved.
    pub fn new(target: Target, policy: RetryPolicy) -> Result<Self, HarnessError> {
        let probe = EndpointProbe::new(policy)?;
        tracing::debug!(target = %target, "Verification harness ready");
        Ok(Self { target, probe })
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    /// Probe the target and check the response against `expectation`.
    ///
    /// Returns the successful [`ProbeResult`] on a pass. On a fail, the
    /// returned [`VerifyError`]'s `Display` output is the human-readable
    /// diagnostic for the test case.
    pub fn verify(&self, expectation: &Expectation) -> Result<ProbeResult, VerifyError> {
        match self.probe.probe(&self.target) {
            ProbeOutcome::Success(result) => {
                if result.status != expectation.status {
                    return Err(VerifyError::StatusMismatch {
                        expected: expectation.status,
                        actual: result.status,
                        body: result.body,
                    });
                }
                if !expectation.body.matches(&result.body) {
                    return Err(VerifyError::BodyMismatch {
                        expected: expectation.body.to_string(),
                        actual: result.body,
                    });
                }
                tracing::info!(
                    target = %self.target,
                    status = result.status,
                    "Verification passed"
                );
                Ok(result)
            }
            ProbeOutcome::Timeout { attempts, elapsed } => {
                Err(VerifyError::Timeout { attempts, elapsed })
            }
            ProbeOutcome::ConnectionRefused { attempts, elapsed } => {
                Err(VerifyError::ConnectionRefused { attempts, elapsed })
            }
            ProbeOutcome::UnexpectedStatus { result, attempts } => {
                Err(VerifyError::UnexpectedStatus {
                    status: result.status,
                    body: result.body,
                    attempts,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_expectation_any() {
        assert!(BodyExpectation::Any.matches(""));
        assert!(BodyExpectation::Any.matches("anything"));
    }

    #[test]
    fn test_body_expectation_exact() {
        let expectation = BodyExpectation::Exact("hello".to_string());
        assert!(expectation.matches("hello"));
        assert!(!expectation.matches("hello world"));
        assert!(!expectation.matches(""));
    }

    #[test]
    fn test_body_expectation_contains() {
        let expectation = BodyExpectation::Contains("Hello! How are you today?".to_string());
        assert!(expectation.matches("<p>Hello! How are you today?</p>"));
        assert!(!expectation.matches("Goodbye"));
    }

    #[test]
    fn test_expectation_builders() {
        let expectation = Expectation::ok();
        assert_eq!(expectation.status, 200);
        assert_eq!(expectation.body, BodyExpectation::Any);

        let expectation = Expectation::status(204).with_body_equals("");
        assert_eq!(expectation.status, 204);
        assert_eq!(expectation.body, BodyExpectation::Exact(String::new()));

        let expectation = Expectation::ok().with_body_contains("hello");
        assert_eq!(
            expectation.body,
            BodyExpectation::Contains("hello".to_string())
        );
    }

    #[test]
    fn test_body_expectation_display() {
        assert_eq!(BodyExpectation::Any.to_string(), "any body");
        assert_eq!(
            BodyExpectation::Exact("hello".to_string()).to_string(),
            "body equal to \"hello\""
        );
        assert_eq!(
            BodyExpectation::Contains("hi".to_string()).to_string(),
            "body containing \"hi\""
        );
    }

    #[test]
    fn test_from_config_resolves_target() {
        let config = ServerConfig {
            context_root: "app".to_string(),
            path: "path".to_string(),
            ..Default::default()
        };
        let harness = VerificationHarness::from_config(&config).unwrap();
        assert_eq!(harness.target().as_str(), "http://localhost:9080/app/path");
    }

    #[test]
    fn test_from_config_rejects_bad_scheme() {
        let config = ServerConfig {
            scheme: "gopher".to_string(),
            ..Default::default()
        };
        let result = VerificationHarness::from_config(&config);
        assert!(matches!(result, Err(HarnessError::Target(_))));
    }
}
