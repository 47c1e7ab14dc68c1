//! Deployment coordinates of the server under test, loaded from YAML.

use serde::Deserialize;
use std::path::Path;

use crate::error::{HarnessError, TargetError};
use crate::models::{RetryPolicy, Target};

/// Where the collaborator (build tool, CI pipeline) says the deployed
/// application lives. The server is assumed already built and started;
/// this config only locates it.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Context root the application was deployed under
    /// (e.g. "liberty.maven.test.app").
    #[serde(default)]
    pub context_root: String,

    /// Resource path within the application (e.g. "servlet").
    #[serde(default)]
    pub path: String,

    #[serde(default)]
    pub retry: RetryPolicy,
}

fn default_scheme() -> String {
    "http".to_string()
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    9080
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            host: default_host(),
            port: default_port(),
            context_root: String::new(),
            path: String::new(),
            retry: RetryPolicy::default(),
        }
    }
}

impl ServerConfig {
    /// Parse a YAML config string. Malformed config is fatal to the suite,
    /// never silently defaulted.
    pub fn from_yaml(content: &str) -> Result<Self, HarnessError> {
        let config: Self = serde_yaml::from_str(content)?;
        tracing::debug!(
            host = %config.host,
            port = config.port,
            context_root = %config.context_root,
            "Loaded server config"
        );
        Ok(config)
    }

    /// Load config from a YAML file.
    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let content = std::fs::read_to_string(path).map_err(|e| HarnessError::ConfigRead {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content)
    }

    /// Resolve the endpoint target from the deployment coordinates.
    pub fn target(&self) -> Result<Target, TargetError> {
        let context = self.context_root.trim_matches('/');
        let resource = self.path.trim_matches('/');
        let joined = match (context.is_empty(), resource.is_empty()) {
            (true, true) => String::new(),
            (true, false) => resource.to_string(),
            (false, true) => context.to_string(),
            (false, false) => format!("{context}/{resource}"),
        };
        Target::from_parts(&self.scheme, &self.host, self.port, &joined)
    }
}
