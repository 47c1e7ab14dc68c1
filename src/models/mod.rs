pub mod config;
pub mod outcome;
pub mod policy;
pub mod target;

pub use config::ServerConfig;
pub use outcome::{ProbeOutcome, ProbeResult};
pub use policy::RetryPolicy;
pub use target::Target;
