use std::time::Duration;
use thiserror::Error;

/// Errors constructing a [`Target`](crate::models::Target).
#[derive(Debug, Error)]
pub enum TargetError {
    #[error("invalid target URL {url:?}: {reason}")]
    Parse { url: String, reason: String },

    #[error("unsupported scheme {scheme:?} in target URL {url:?} (expected http or https)")]
    Scheme { url: String, scheme: String },

    #[error("target URL {url:?} has no host")]
    MissingHost { url: String },
}

/// Errors constructing an [`EndpointProbe`](crate::probe::EndpointProbe).
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("retry policy must allow at least one attempt")]
    ZeroAttempts,

    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Fatal suite-setup errors: the harness could not be constructed at all.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("invalid target: {0}")]
    Target(#[from] TargetError),

    #[error("failed to read server config from {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed server config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error(transparent)]
    Probe(#[from] ProbeError),
}

/// Per-verification failures. The `Display` output is the diagnostic the
/// test runner (or CLI) reports for the failed case.
#[derive(Debug, Error)]
pub enum VerifyError {
    #[error(
        "connection refused: server never accepted a connection after {attempts} attempt(s) in {elapsed:?}"
    )]
    ConnectionRefused { attempts: u32, elapsed: Duration },

    #[error("timed out: no successful response after {attempts} attempt(s) in {elapsed:?}")]
    Timeout { attempts: u32, elapsed: Duration },

    #[error(
        "unexpected status {status} after {attempts} attempt(s); body: {body:?}"
    )]
    UnexpectedStatus {
        status: u16,
        body: String,
        attempts: u32,
    },

    #[error("status mismatch: expected {expected}, got {actual}; body: {body:?}")]
    StatusMismatch {
        expected: u16,
        actual: u16,
        body: String,
    },

    #[error("body mismatch: expected {expected}, got {actual:?}")]
    BodyMismatch { expected: String, actual: String },
}

impl VerifyError {
    /// True for failures caused by the server content, false for failures
    /// caused by the network (server unreachable).
    pub fn is_network_failure(&self) -> bool {
        matches!(
            self,
            VerifyError::ConnectionRefused { .. } | VerifyError::Timeout { .. }
        )
    }
}
