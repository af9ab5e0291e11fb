//! Domain types and validators for release tool configuration.
//!
//! Pure functions only: no I/O, no async, no filesystem access.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

// ── Constants ────────────────────────────────────────────────────────────────

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8080/v1";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 15;
pub const DEFAULT_SOAK_SECS: u64 = 60;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
/// Upper bound for the poll interval, soak window and ready timeout (7 days).
pub const MAX_WINDOW_SECS: u64 = 7 * 24 * 60 * 60;
pub const VALID_BLOB_BACKENDS: &[&str] = &["s3", "local"];

// ── Config schema ────────────────────────────────────────────────────────────

/// Top-level configuration stored in `~/.eb-release/config.yaml`.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct ReleaseConfig {
    pub platform: PlatformConfig,
    pub blob_store: BlobStoreConfig,
    pub deploy: DeployConfig,
}

/// Control plane connection settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PlatformConfig {
    /// Base URL of the control plane API, e.g. `https://platform.example.com/v1`.
    pub endpoint: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
}

impl Default for PlatformConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

/// Object storage settings used by the publisher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct BlobStoreConfig {
    /// `s3` (default) or `local`.
    pub backend: String,
    /// Region override for the `s3` backend.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Endpoint override for S3-compatible stores.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Root directory for the `local` backend. Buckets become subdirectories.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root: Option<String>,
}

impl Default for BlobStoreConfig {
    fn default() -> Self {
        Self {
            backend: "s3".to_string(),
            region: None,
            endpoint: None,
            root: None,
        }
    }
}

/// Polling and soak timings for `eb-deploy`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeployConfig {
    pub poll_interval_secs: u64,
    pub soak_secs: u64,
    /// Upper bound on the wait for `Ready`. Unset means wait indefinitely.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ready_timeout_secs: Option<u64>,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: DEFAULT_POLL_INTERVAL_SECS,
            soak_secs: DEFAULT_SOAK_SECS,
            ready_timeout_secs: None,
        }
    }
}

// ── Validators ───────────────────────────────────────────────────────────────

impl ReleaseConfig {
    /// Check every section for values the tools cannot work with.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<()> {
        validate_endpoint(&self.platform.endpoint)?;
        if self.platform.request_timeout_secs == 0 {
            return Err(ConfigError::ZeroDuration {
                key: "platform.request_timeout_secs",
            }
            .into());
        }
        validate_blob_store(&self.blob_store)?;
        if self.deploy.poll_interval_secs == 0 {
            return Err(ConfigError::ZeroDuration {
                key: "deploy.poll_interval_secs",
            }
            .into());
        }
        if self.deploy.ready_timeout_secs == Some(0) {
            return Err(ConfigError::ZeroDuration {
                key: "deploy.ready_timeout_secs",
            }
            .into());
        }
        check_window("deploy.poll_interval_secs", self.deploy.poll_interval_secs)?;
        check_window("deploy.soak_secs", self.deploy.soak_secs)?;
        if let Some(timeout) = self.deploy.ready_timeout_secs {
            check_window("deploy.ready_timeout_secs", timeout)?;
        }
        Ok(())
    }
}

fn check_window(key: &'static str, secs: u64) -> Result<(), ConfigError> {
    if secs > MAX_WINDOW_SECS {
        return Err(ConfigError::WindowTooLarge {
            key,
            max_secs: MAX_WINDOW_SECS,
        });
    }
    Ok(())
}

/// Validates that an endpoint is an absolute http(s) URL.
///
/// # Errors
///
/// Returns an error if the scheme is missing or not http/https.
pub fn validate_endpoint(endpoint: &str) -> Result<()> {
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        return Ok(());
    }
    Err(ConfigError::InvalidEndpoint(endpoint.to_string()).into())
}

/// Validates the blob store backend and its required settings.
///
/// # Errors
///
/// Returns an error for unknown backends or a `local` backend without a root.
pub fn validate_blob_store(cfg: &BlobStoreConfig) -> Result<()> {
    if !VALID_BLOB_BACKENDS.contains(&cfg.backend.as_str()) {
        return Err(ConfigError::UnknownBackend {
            backend: cfg.backend.clone(),
            valid: VALID_BLOB_BACKENDS.join(", "),
        }
        .into());
    }
    if cfg.backend == "local" && cfg.root.is_none() {
        return Err(ConfigError::MissingLocalRoot.into());
    }
    Ok(())
}

// ── Unit tests ───────────────────────────────────────────────────────────────
