//! Common test infrastructure for deploycheck integration tests.
//!
//! Each test file compiles its own copy of this module, so items may appear
//! unused from the perspective of a single test file even though they're
//! used elsewhere.

#![allow(dead_code)]

pub mod mock_server;

pub use mock_server::MockEndpoint;

use deploycheck::error::VerifyError;
use deploycheck::harness::{Expectation, VerificationHarness};
use deploycheck::models::{ProbeOutcome, ProbeResult, RetryPolicy, Target};
use deploycheck::probe::EndpointProbe;

/// Retry policy tuned for tests: quick delays, short deadlines.
pub fn fast_policy(max_attempts: u32) -> RetryPolicy {
    RetryPolicy {
        max_attempts,
        initial_delay_ms: 20,
        attempt_timeout_secs: 2,
        overall_timeout_secs: 10,
        ..Default::default()
    }
}

/// Run the blocking probe off the tokio test runtime.
pub async fn run_probe(target: Target, policy: RetryPolicy) -> ProbeOutcome {
    tokio::task::spawn_blocking(move || {
        let probe = EndpointProbe::new(policy).expect("Failed to build probe");
        probe.probe(&target)
    })
    .await
    .expect("Probe task panicked")
}

/// Run one harness verification off the tokio test runtime.
pub async fn run_verify(
    target: Target,
    policy: RetryPolicy,
    expectation: Expectation,
) -> Result<ProbeResult, VerifyError> {
    tokio::task::spawn_blocking(move || {
        let harness =
            VerificationHarness::new(target, policy).expect("Failed to build harness");
        harness.verify(&expectation)
    })
    .await
    .expect("Verify task panicked")
}

/// Bind then drop a listener so the port is known-closed.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind");
    listener.local_addr().expect("No local addr").port()
}
