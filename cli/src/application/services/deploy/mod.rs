//! Application service: environment rollout use-case.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.
//! All I/O is routed through injected port traits.

pub mod monitor;

use anyhow::{Context, Result};
use eb_api_types::UpdateEnvironmentResponse;
use tracing::debug;

use crate::application::ports::{
    Clock, EnvironmentInspector, EnvironmentUpdater, ProgressReporter,
};
use crate::domain::{DeploySettings, Verdict};

pub use monitor::Monitor;

/// What to roll out, and where.
#[derive(Debug, Clone, Copy)]
pub struct DeployRequest<'a> {
    pub application: &'a str,
    pub environment: &'a str,
    pub version: &'a str,
}

/// Outcome of `perform_environment_update`.
#[derive(Debug)]
pub struct DeployReport {
    pub environment_id: String,
    pub request_id: String,
    pub verdict: Verdict,
    /// Number of distinct platform events shown while monitoring.
    pub events_logged: usize,
}

/// Update an environment to a version and watch the rollout to completion.
///
/// Issues one update request, waits for `Ready`, checks the deployed version
/// once health leaves `Grey`, then requires `Green` on every poll until the
/// soak window closes.
///
/// # Errors
///
/// Returns an error if the platform rejects the update or any status call
/// fails. A rollout that completes but does not verify is reported through
/// [`DeployReport::verdict`], not as an error.
pub async fn perform_environment_update<P, C, R>(
    platform: &P,
    clock: &C,
    reporter: &R,
    request: DeployRequest<'_>,
    settings: DeploySettings,
) -> Result<DeployReport>
where
    P: EnvironmentUpdater + EnvironmentInspector,
    C: Clock,
    R: ProgressReporter,
{
    reporter.step(&format!(
        "Updating environment {} to version {}",
        request.environment, request.version
    ));

    let update = update_environment_to_version(platform, request).await?;
    reporter.step(&format!("Update has been requested: {}", update.request_id));

    let mut monitor = Monitor::new(platform, clock, reporter, settings, &update);
    let verdict = monitor.run(request.version).await?;

    match &verdict {
        Verdict::Passed => reporter.success("Release Complete!"),
        Verdict::Failed(_) => reporter.error("Release Failed!"),
    }

    Ok(DeployReport {
        environment_id: update.environment_id,
        request_id: update.request_id,
        verdict,
        events_logged: monitor.events().logged().len(),
    })
}

/// Issue the update request and capture the ids needed for polling.
///
/// # Errors
///
/// Returns an error if the platform refuses the update.
pub async fn update_environment_to_version(
    platform: &impl EnvironmentUpdater,
    request: DeployRequest<'_>,
) -> Result<UpdateEnvironmentResponse> {
    let response = platform
        .update_environment(request.application, request.environment, request.version)
        .await
        .with_context(|| {
            format!(
                "requesting update of {} to {}",
                request.environment, request.version
            )
        })?;
    debug!(?response, "update accepted");
    Ok(response)
}
