//! Application context: unified state passed to every command handler.
//!
//! `AppContext` owns the configuration and one instance of each port
//! implementation. Production code uses the default type parameters; tests
//! substitute fakes through [`AppContext::with_ports`].

use anyhow::Result;

use crate::domain::{DeploySettings, ReleaseConfig};
use crate::infra::blob::ObjectStoreBlobStore;
use crate::infra::clock::SystemClock;
use crate::infra::platform::HttpPlatformClient;
use crate::output::TracingReporter;

/// Unified application context passed to every command handler.
///
/// Constructed once per process and passed as `&AppContext` to the command,
/// so no collaborator lives in process-wide state.
pub struct AppContext<
    P = HttpPlatformClient,
    B = ObjectStoreBlobStore,
    C = SystemClock,
    R = TracingReporter,
> {
    /// Effective configuration after CLI overrides.
    pub config: ReleaseConfig,
    /// Control plane client.
    pub platform: P,
    /// Package storage.
    pub blobs: B,
    /// Wall clock and poll sleeps.
    pub clock: C,
    /// Operator log.
    pub reporter: R,
}

impl AppContext {
    /// Construct the production context from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform client cannot be built.
    pub fn new(config: ReleaseConfig) -> Result<Self> {
        let platform = HttpPlatformClient::new(&config.platform)?;
        let blobs = ObjectStoreBlobStore::new(config.blob_store.clone());
        Ok(Self {
            config,
            platform,
            blobs,
            clock: SystemClock,
            reporter: TracingReporter,
        })
    }
}

impl<P, B, C, R> AppContext<P, B, C, R> {
    /// Assemble a context from explicit port implementations.
    pub fn with_ports(config: ReleaseConfig, platform: P, blobs: B, clock: C, reporter: R) -> Self {
        Self {
            config,
            platform,
            blobs,
            clock,
            reporter,
        }
    }

    /// Monitoring timings derived from the `deploy` section.
    #[must_use]
    pub fn deploy_settings(&self) -> DeploySettings {
        DeploySettings::from(&self.config.deploy)
    }
}
