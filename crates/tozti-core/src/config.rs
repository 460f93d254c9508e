//! Configuration module
//!
//! Client configuration loaded from the environment (and `.env` through
//! dotenvy). The origin is the single source every endpoint URL derives from.

use std::env;

use url::Url;

use crate::error::{ToztiError, ToztiResult};

// Common constants
const DEFAULT_ORIGIN: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_ENVIRONMENT: &str = "development";

/// Configuration shared by the API client and the CLI
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Normalised origin: scheme, host and optional port, no trailing slash
    pub origin: String,
    pub timeout_secs: u64,
    pub environment: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            environment: DEFAULT_ENVIRONMENT.to_string(),
        }
    }
}

impl ClientConfig {
    /// Build a config for `origin` with default timeout and environment.
    pub fn for_origin(origin: &str) -> ToztiResult<Self> {
        Ok(Self {
            origin: normalize_origin(origin)?,
            ..Self::default()
        })
    }

    /// Load from TOZTI_ORIGIN (or TOZTI_URL), TOZTI_TIMEOUT_SECS and TOZTI_ENVIRONMENT.
    pub fn from_env() -> ToztiResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an explicit variable source.
    pub fn from_lookup<F>(lookup: F) -> ToztiResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let origin = lookup("TOZTI_ORIGIN")
            .or_else(|| lookup("TOZTI_URL"))
            .unwrap_or_else(|| DEFAULT_ORIGIN.to_string());

        let timeout_secs = match lookup("TOZTI_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                ToztiError::Config(format!(
                    "TOZTI_TIMEOUT_SECS must be a positive integer, got '{}'",
                    raw
                ))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };

        let environment =
            lookup("TOZTI_ENVIRONMENT").unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

        let config = Self {
            origin: normalize_origin(&origin)?,
            timeout_secs,
            environment,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ToztiResult<()> {
        if self.timeout_secs == 0 {
            return Err(ToztiError::Config(
                "TOZTI_TIMEOUT_SECS must be greater than 0".to_string(),
            ));
        }
        normalize_origin(&self.origin)?;
        Ok(())
    }

    /// Check if the client is running against a production backend
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

/// Reduce `raw` to its origin (`scheme://host[:port]`).
///
/// Userinfo, paths other than `/`, queries and fragments are rejected rather than
/// dropped so a misconfigured prefix never silently changes endpoint URLs.
pub fn normalize_origin(raw: &str) -> ToztiResult<String> {
    let trimmed = raw.trim();
    let url = Url::parse(trimmed).map_err(|e| ToztiError::invalid_origin(trimmed, e.to_string()))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ToztiError::invalid_origin(
            trimmed,
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    if url.host_str().is_none() {
        return Err(ToztiError::invalid_origin(trimmed, "missing host"));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(ToztiError::invalid_origin(trimmed, "origin must not carry credentials"));
    }
    if url.path() != "/" && !url.path().is_empty() {
        return Err(ToztiError::invalid_origin(
            trimmed,
            format!("origin must not carry a path, got '{}'", url.path()),
        ));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ToztiError::invalid_origin(
            trimmed,
            "origin must not carry a query or fragment",
        ));
    }

    Ok(url.origin().ascii_serialization())
}
