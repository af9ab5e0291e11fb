//! `TracingReporter`: Presentation-layer implementation of `ProgressReporter`.
//!
//! Maps progress calls from application services onto `tracing` levels so
//! they share one operator log with everything else.

use eb_api_types::{EnvironmentEvent, EventSeverity};
use tracing::{error, info, warn};

use crate::application::ports::ProgressReporter;

/// Progress reporter that writes through the global `tracing` subscriber.
///
/// - `step()` and `success()` log at INFO
/// - `error()` logs at ERROR
/// - `event()` logs `... HH:MM:SS [SEVERITY] message`, at WARN for
///   platform events of severity WARN or above
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl ProgressReporter for TracingReporter {
    fn step(&self, message: &str) {
        info!("{message}");
    }

    fn success(&self, message: &str) {
        info!("{message}");
    }

    fn error(&self, message: &str) {
        error!("{message}");
    }

    fn event(&self, event: &EnvironmentEvent) {
        let line = format_event(event);
        if event.severity >= EventSeverity::Warn {
            warn!("{line}");
        } else {
            info!("{line}");
        }
    }
}

/// Render a platform event the way it appears in the operator log.
#[must_use]
pub fn format_event(event: &EnvironmentEvent) -> String {
    format!(
        "... {} [{}] {}",
        event.event_date.format("%H:%M:%S"),
        event.severity,
        event.message
    )
}
