use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use deploycheck::harness::{Expectation, VerificationHarness};
use deploycheck::models::{ServerConfig, Target};

#[derive(Parser)]
#[command(name = "deploycheck")]
#[command(about = "Verify that a freshly deployed web application answers HTTP")]
struct Cli {
    /// Endpoint URL to probe (e.g. http://localhost:9080/app/path).
    /// Overrides the target from --config when both are given.
    url: Option<String>,

    /// YAML file with server coordinates and retry policy
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Expected HTTP status code
    #[arg(long, default_value_t = 200)]
    expect_status: u16,

    /// Require the response body to contain this substring
    #[arg(long, conflicts_with = "expect_exact")]
    expect_contains: Option<String>,

    /// Require the response body to equal this text exactly
    #[arg(long)]
    expect_exact: Option<String>,

    /// Maximum number of GET attempts
    #[arg(long)]
    attempts: Option<u32>,

    /// Delay between attempts in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Backoff multiplier applied to the delay after each failure
    #[arg(long)]
    backoff_factor: Option<f64>,

    /// Overall deadline in seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Per-attempt timeout in seconds
    #[arg(long)]
    attempt_timeout_secs: Option<u64>,

    /// Response body capture limit in characters
    #[arg(long)]
    body_limit: Option<usize>,

    /// Print the verdict as JSON instead of plain text
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "deploycheck=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let mut config = match &cli.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    };

    if let Some(attempts) = cli.attempts {
        config.retry.max_attempts = attempts;
    }
    if let Some(delay_ms) = cli.delay_ms {
        config.retry.initial_delay_ms = delay_ms;
    }
    if let Some(factor) = cli.backoff_factor {
        config.retry.backoff_factor = factor;
    }
    if let Some(secs) = cli.timeout_secs {
        config.retry.overall_timeout_secs = secs;
    }
    if let Some(secs) = cli.attempt_timeout_secs {
        config.retry.attempt_timeout_secs = secs;
    }
    if let Some(limit) = cli.body_limit {
        config.retry.body_limit = limit;
    }

    let target = match &cli.url {
        Some(url) => Target::parse(url)?,
        None => {
            if cli.config.is_none() {
                anyhow::bail!("either a URL argument or --config is required");
            }
            config.target()?
        }
    };

    let mut expectation = Expectation::status(cli.expect_status);
    if let Some(needle) = cli.expect_contains {
        expectation = expectation.with_body_contains(needle);
    } else if let Some(body) = cli.expect_exact {
        expectation = expectation.with_body_equals(body);
    }

    let harness = VerificationHarness::new(target.clone(), config.retry.clone())?;

    match harness.verify(&expectation) {
        Ok(result) => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "target": target.as_str(),
                        "pass": true,
                        "status": result.status,
                        "elapsed_ms": result.elapsed.as_millis() as u64,
                        "truncated": result.truncated,
                    })
                );
            } else {
                println!(
                    "PASS {} ({} in {:?})",
                    target, result.status, result.elapsed
                );
            }
            Ok(())
        }
        Err(e) => {
            if cli.json {
                println!(
                    "{}",
                    serde_json::json!({
                        "target": target.as_str(),
                        "pass": false,
                        "diagnostic": e.to_string(),
                    })
                );
            } else {
                eprintln!("FAIL {}: {}", target, e);
            }
            std::process::exit(1);
        }
    }
}
