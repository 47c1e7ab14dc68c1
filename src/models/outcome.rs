//! Probe results and their classification.

use std::time::Duration;

/// What a single HTTP response looked like: status, captured body, and how
/// long the attempt took. Owned by the caller that issued the probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeResult {
    pub status: u16,
    pub body: String,
    pub elapsed: Duration,
    /// True when the body exceeded the capture limit and was cut off.
    pub truncated: bool,
}

impl ProbeResult {
    pub fn new(status: u16, body: String, elapsed: Duration, limit: usize) -> Self {
        let (body, truncated) = truncate_chars(body, limit);
        Self {
            status,
            body,
            elapsed,
            truncated,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Truncate to at most `limit` characters, on a char boundary.
fn truncate_chars(body: String, limit: usize) -> (String, bool) {
    match body.char_indices().nth(limit) {
        Some((idx, _)) => (body[..idx].to_string(), true),
        None => (body, false),
    }
}

/// Classification of one logical probe run (including its internal
/// retries). Exactly one variant per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// A 2xx response arrived within policy limits.
    Success(ProbeResult),

    /// The overall deadline passed without a successful response.
    Timeout { attempts: u32, elapsed: Duration },

    /// The attempt budget ran out while the server was still refusing
    /// connections.
    ConnectionRefused { attempts: u32, elapsed: Duration },

    /// The server answered, but never with a 2xx. Carries the last
    /// response seen.
    UnexpectedStatus { result: ProbeResult, attempts: u32 },
}

impl ProbeOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success(_))
    }

    /// Number of GET attempts actually issued, where known. `Success`
    /// reports `None`: the result speaks for itself.
    pub fn attempts(&self) -> Option<u32> {
        match self {
            ProbeOutcome::Success(_) => None,
            ProbeOutcome::Timeout { attempts, .. }
            | ProbeOutcome::ConnectionRefused { attempts, .. }
            | ProbeOutcome::UnexpectedStatus { attempts, .. } => Some(*attempts),
        }
    }
}
