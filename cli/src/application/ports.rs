//! Port trait definitions for the Application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain` and the wire types crate;
//! never from `crate::infra`, `crate::commands`, or `crate::output`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Utc};
use eb_api_types::{
    ApplicationVersion, CreateApplicationVersionRequest, EnvironmentDescription,
    EnvironmentEvent, EventSeverity, UpdateEnvironmentResponse,
};

use crate::domain::ReleaseConfig;

// ── Platform Port Traits ──────────────────────────────────────────────────────

/// Starts environment updates.
#[allow(async_fn_in_trait)]
pub trait EnvironmentUpdater {
    /// Ask the platform to move `environment` of `application` to `version`.
    ///
    /// Returns the environment id and the request correlation id used to
    /// follow the update's event log.
    async fn update_environment(
        &self,
        application: &str,
        environment: &str,
        version: &str,
    ) -> Result<UpdateEnvironmentResponse>;
}

/// Reads environment state and update events.
#[allow(async_fn_in_trait)]
pub trait EnvironmentInspector {
    /// Current status, health and deployed version of an environment.
    async fn describe_environment(&self, environment_id: &str) -> Result<EnvironmentDescription>;

    /// Events recorded for a request at or above `min_severity`, newest first.
    async fn describe_events(
        &self,
        request_id: &str,
        min_severity: EventSeverity,
    ) -> Result<Vec<EnvironmentEvent>>;
}

/// Registers new application versions.
#[allow(async_fn_in_trait)]
pub trait VersionRegistry {
    async fn create_application_version(
        &self,
        application: &str,
        request: &CreateApplicationVersionRequest,
    ) -> Result<ApplicationVersion>;
}

/// Composite trait: any type implementing all three sub-traits is a
/// `PlatformControl` client.
pub trait PlatformControl: EnvironmentUpdater + EnvironmentInspector + VersionRegistry {}

/// Blanket implementation: any type implementing all three sub-traits is a
/// `PlatformControl` client.
impl<T> PlatformControl for T where T: EnvironmentUpdater + EnvironmentInspector + VersionRegistry {}

// ── Blob Store Port ───────────────────────────────────────────────────────────

/// Object storage used to hold uploaded packages.
#[allow(async_fn_in_trait)]
pub trait BlobStore {
    /// Upload the file at `local` to `bucket` under `key`.
    async fn upload(&self, local: &Path, bucket: &str, key: &str) -> Result<()>;
}

// ── Clock Port ────────────────────────────────────────────────────────────────

/// Wall clock and sleep, so polling loops can run against simulated time.
#[allow(async_fn_in_trait)]
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
    async fn sleep(&self, duration: Duration);
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Operator-facing progress log. Sync trait: no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a failure message.
    fn error(&self, message: &str);
    /// Emit one platform event from an update's event log.
    fn event(&self, event: &EnvironmentEvent);
}

// ── Config Port ───────────────────────────────────────────────────────────────

/// Abstracts loading of the release configuration.
pub trait ConfigStore {
    /// Load configuration, falling back to defaults when no file exists.
    fn load(&self) -> Result<ReleaseConfig>;
    /// Location the configuration is read from.
    fn path(&self) -> Result<PathBuf>;
}
