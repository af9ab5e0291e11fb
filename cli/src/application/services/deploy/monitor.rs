//! Rollout monitoring state machine: wait-for-ready → verify-version →
//! soak-health.
//!
//! Every poll logs new events before the status or health it read is acted
//! on. The only suspension points are the three `Clock::sleep` calls.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use eb_api_types::{EnvironmentDescription, UpdateEnvironmentResponse};
use tracing::debug;

use crate::application::ports::{Clock, EnvironmentInspector, ProgressReporter};
use crate::application::services::events::EventLog;
use crate::domain::{DeployFailure, DeploySettings, Verdict};

/// Polls one environment through an update it has accepted.
pub struct Monitor<'a, P, C, R> {
    platform: &'a P,
    clock: &'a C,
    reporter: &'a R,
    settings: DeploySettings,
    environment_id: String,
    events: EventLog,
}

impl<'a, P, C, R> Monitor<'a, P, C, R>
where
    P: EnvironmentInspector,
    C: Clock,
    R: ProgressReporter,
{
    #[must_use]
    pub fn new(
        platform: &'a P,
        clock: &'a C,
        reporter: &'a R,
        settings: DeploySettings,
        update: &UpdateEnvironmentResponse,
    ) -> Self {
        Self {
            platform,
            clock,
            reporter,
            settings,
            environment_id: update.environment_id.clone(),
            events: EventLog::new(update.request_id.clone()),
        }
    }

    /// Events shown so far.
    #[must_use]
    pub fn events(&self) -> &EventLog {
        &self.events
    }

    /// Run all three phases for an update targeting `version`.
    ///
    /// # Errors
    ///
    /// Returns an error if any platform call fails.
    pub async fn run(&mut self, version: &str) -> Result<Verdict> {
        if let Verdict::Failed(failure) = self.wait_for_ready_status().await? {
            return Ok(Verdict::Failed(failure));
        }
        self.reporter.success("Environment update has been completed");

        self.reporter.step(&format!(
            "Will now monitor environment health for {} seconds",
            self.settings.soak.as_secs()
        ));
        self.monitor_env_health(version).await
    }

    /// Poll until the environment reports `Ready`.
    ///
    /// Without a configured ready timeout this never gives up.
    ///
    /// # Errors
    ///
    /// Returns an error if any platform call fails.
    pub async fn wait_for_ready_status(&mut self) -> Result<Verdict> {
        let deadline = match self.settings.ready_timeout {
            Some(timeout) => Some(self.cutoff_after(timeout)?),
            None => None,
        };

        loop {
            let details = self.poll().await?;
            debug!(status = %details.status, "current environment status");

            if details.status.is_ready() {
                self.reporter
                    .success("Environment status transition to 'Ready' completed");
                return Ok(Verdict::Passed);
            }

            if let Some(deadline) = deadline {
                if self.clock.now() > deadline {
                    let failure = DeployFailure::ReadyTimeout {
                        timeout_secs: self.settings.ready_timeout.map_or(0, |t| t.as_secs()),
                        last_status: details.status.to_string(),
                    };
                    return Ok(self.fail(failure));
                }
            }

            self.clock.sleep(self.settings.poll_interval).await;
        }
    }

    /// Verify the deployed version, then require `Green` until the soak
    /// window closes. Both phases share one cutoff, fixed here.
    ///
    /// # Errors
    ///
    /// Returns an error if any platform call fails.
    pub async fn monitor_env_health(&mut self, version: &str) -> Result<Verdict> {
        let cutoff = self.cutoff_after(self.settings.soak)?;

        if let Verdict::Failed(failure) = self.check_env_version(version, cutoff).await? {
            return Ok(Verdict::Failed(failure));
        }
        self.ensure_env_health_green(cutoff).await
    }

    /// Wait for health to leave `Grey`, then compare the deployed version.
    ///
    /// A different version means the platform rolled the update back.
    ///
    /// # Errors
    ///
    /// Returns an error if any platform call fails.
    pub async fn check_env_version(
        &mut self,
        version: &str,
        cutoff: DateTime<Utc>,
    ) -> Result<Verdict> {
        loop {
            let details = self.poll().await?;

            if !details.health.is_grey() {
                debug!(health = %details.health, "have reached a non-grey health");
                if details.version_label.as_deref() == Some(version) {
                    return Ok(Verdict::Passed);
                }
                let failure = DeployFailure::VersionMismatch {
                    expected: version.to_string(),
                    actual: details.version_label,
                };
                return Ok(self.fail(failure));
            }

            if self.clock.now() > cutoff {
                return Ok(self.fail(DeployFailure::GreyHealthTimeout));
            }
            self.clock.sleep(self.settings.poll_interval).await;
        }
    }

    /// Require `Green` on every poll until `cutoff` has passed.
    ///
    /// # Errors
    ///
    /// Returns an error if any platform call fails.
    pub async fn ensure_env_health_green(&mut self, cutoff: DateTime<Utc>) -> Result<Verdict> {
        loop {
            let details = self.poll().await?;

            if !details.health.is_green() {
                let failure = DeployFailure::HealthRegression {
                    health: details.health.to_string(),
                };
                return Ok(self.fail(failure));
            }
            self.reporter.step("... Environment health is Green");

            if self.clock.now() > cutoff {
                break;
            }
            self.clock.sleep(self.settings.poll_interval).await;
        }

        self.reporter
            .success("Monitoring complete.  Environment is healthy");
        Ok(Verdict::Passed)
    }

    /// Log new events, then read the environment.
    async fn poll(&mut self) -> Result<EnvironmentDescription> {
        self.events
            .log_new_events(self.platform, self.reporter)
            .await?;
        self.platform
            .describe_environment(&self.environment_id)
            .await
            .with_context(|| format!("describing environment {}", self.environment_id))
    }

    fn cutoff_after(&self, window: std::time::Duration) -> Result<DateTime<Utc>> {
        let window = chrono::Duration::from_std(window).context("monitoring window too large")?;
        self.clock
            .now()
            .checked_add_signed(window)
            .context("monitoring window too large")
    }

    fn fail(&self, failure: DeployFailure) -> Verdict {
        self.reporter.error(&failure.to_string());
        Verdict::Failed(failure)
    }
}
