//! Resolved base URL of the deployed endpoint under test.

use reqwest::Url;
use std::fmt;

use crate::error::TargetError;

/// Immutable endpoint address. Constructed once per suite from the
/// collaborator-provided deployment coordinates and shared by reference
/// across probe attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    url: Url,
}

impl Target {
    /// Parse an absolute `http`/`https` URL.
    pub fn parse(raw: &str) -> Result<Self, TargetError> {
        let url = Url::parse(raw).map_err(|e| TargetError::Parse {
            url: raw.to_string(),
            reason: e.to_string(),
        })?;

        match url.scheme() {
            "http" | "https" => {}
            other => {
                return Err(TargetError::Scheme {
                    url: raw.to_string(),
                    scheme: other.to_string(),
                })
            }
        }

        if url.host_str().is_none() {
            return Err(TargetError::MissingHost {
                url: raw.to_string(),
            });
        }

        Ok(Self { url })
    }

    /// Build a target from individual deployment coordinates.
    ///
    /// `path` may carry multiple segments ("context/servlet"); leading and
    /// trailing slashes are tolerated.
    pub fn from_parts(scheme: &str, host: &str, port: u16, path: &str) -> Result<Self, TargetError> {
        let trimmed = path.trim_matches('/');
        let raw = if trimmed.is_empty() {
            format!("{scheme}://{host}:{port}/")
        } else {
            format!("{scheme}://{host}:{port}/{trimmed}")
        };
        Self::parse(&raw)
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    pub fn as_str(&self) -> &str {
        self.url.as_str()
    }

    pub fn host(&self) -> &str {
        // Guaranteed by parse()
        self.url.host_str().unwrap_or_default()
    }

    pub fn port(&self) -> u16 {
        self.url.port_or_known_default().unwrap_or(80)
    }

    pub fn path(&self) -> &str {
        self.url.path()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.url)
    }
}
