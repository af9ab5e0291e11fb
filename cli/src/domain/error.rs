//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to `anyhow::Error`
//! via the `?` operator.

use std::path::PathBuf;

use thiserror::Error;

// ── Package errors ────────────────────────────────────────────────────────────

/// Errors raised before any remote call is made for a publish.
#[derive(Debug, Error)]
pub enum PackageError {
    #[error("Cannot locate package: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Package path has no file name: {}", .0.display())]
    NoFileName(PathBuf),
}

// ── Deploy failures ───────────────────────────────────────────────────────────

/// Reasons a rollout is declared failed after the update was accepted.
///
/// These are outcomes of monitoring, not transport errors: each one is logged
/// and turns into exit code 1.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeployFailure {
    #[error("Environment did not reach 'Ready' status within {timeout_secs}s (last status: {last_status})")]
    ReadyTimeout { timeout_secs: u64, last_status: String },

    #[error("Version after upgrade did not match expected version ({})", .actual.as_deref().unwrap_or("none"))]
    VersionMismatch {
        expected: String,
        actual: Option<String>,
    },

    #[error("Failed to reach non-grey health before cutoff")]
    GreyHealthTimeout,

    #[error("Environment health is not 'Green' after update ({health})")]
    HealthRegression { health: String },
}

// ── Platform errors ───────────────────────────────────────────────────────────

/// The control plane refused or failed a request.
#[derive(Debug, Error)]
pub enum PlatformError {
    #[error("platform rejected request ({status}): {code}: {message}")]
    Rejected {
        status: u16,
        code: String,
        message: String,
    },

    #[error("platform returned HTTP {status}: {body}")]
    Http { status: u16, body: String },
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid platform endpoint '{0}': must start with http:// or https://")]
    InvalidEndpoint(String),

    #[error("Invalid value for {key}: must be greater than zero")]
    ZeroDuration { key: &'static str },

    #[error("Invalid value for {key}: must be at most {max_secs} seconds")]
    WindowTooLarge { key: &'static str, max_secs: u64 },

    #[error("Unknown blob store backend: {backend}\n\nValid backends: {valid}")]
    UnknownBackend { backend: String, valid: String },

    #[error("Blob store backend 'local' requires blob_store.root")]
    MissingLocalRoot,
}
