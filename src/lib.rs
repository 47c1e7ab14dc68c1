//! Deploycheck - deployment verification probe.
//!
//! Probes a known HTTP endpoint of a freshly deployed web application,
//! retrying while the server is still starting, and turns the outcome into
//! a pass/fail verdict. This library exposes modules for integration testing.

pub mod error;
pub mod harness;
pub mod models;
pub mod probe;
