//! Rollout monitoring settings and outcomes.

use std::time::Duration;

use crate::domain::config::DeployConfig;
use crate::domain::error::DeployFailure;

/// Timings that drive the ready-wait, version-check and soak loops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeploySettings {
    /// Sleep between two polls of the same loop.
    pub poll_interval: Duration,
    /// Window, measured from the moment `Ready` is seen, within which health
    /// must leave `Grey` and then stay `Green`.
    pub soak: Duration,
    /// Give up waiting for `Ready` after this long. `None` waits forever.
    pub ready_timeout: Option<Duration>,
}

impl Default for DeploySettings {
    fn default() -> Self {
        Self::from(&DeployConfig::default())
    }
}

impl From<&DeployConfig> for DeploySettings {
    fn from(cfg: &DeployConfig) -> Self {
        Self {
            poll_interval: Duration::from_secs(cfg.poll_interval_secs),
            soak: Duration::from_secs(cfg.soak_secs),
            ready_timeout: cfg.ready_timeout_secs.map(Duration::from_secs),
        }
    }
}

/// Result of one monitoring phase, or of the whole rollout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Passed,
    Failed(DeployFailure),
}

impl Verdict {
    #[must_use]
    pub fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }
}
