//! Event log replay with de-duplication across polls.
//!
//! The platform returns the whole event log of a request on every call, so
//! each poll re-reads events that were already shown. `EventLog` remembers
//! what it has emitted and only forwards the rest.

use std::collections::HashSet;

use anyhow::{Context, Result};
use eb_api_types::{EnvironmentEvent, EventSeverity};

use crate::application::ports::{EnvironmentInspector, ProgressReporter};

/// Lowest severity fetched from the platform.
pub const MIN_EVENT_SEVERITY: EventSeverity = EventSeverity::Info;

/// Already-emitted events of one update request.
///
/// Two events are the same when every field is equal, so an event repeated
/// verbatim later in the log is suppressed too.
#[derive(Debug)]
pub struct EventLog {
    request_id: String,
    logged: Vec<EnvironmentEvent>,
    seen: HashSet<EnvironmentEvent>,
}

impl EventLog {
    #[must_use]
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            logged: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Events emitted so far, oldest first.
    #[must_use]
    pub fn logged(&self) -> &[EnvironmentEvent] {
        &self.logged
    }

    /// Fetch the request's events and emit the ones not shown yet.
    ///
    /// Returns how many events were emitted by this call.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform cannot list events.
    pub async fn log_new_events(
        &mut self,
        platform: &impl EnvironmentInspector,
        reporter: &impl ProgressReporter,
    ) -> Result<usize> {
        let events = platform
            .describe_events(&self.request_id, MIN_EVENT_SEVERITY)
            .await
            .with_context(|| format!("listing events for request {}", self.request_id))?;
        Ok(self.record(events, reporter))
    }

    /// Replay a newest-first batch oldest-first, emitting unseen events.
    pub fn record(
        &mut self,
        newest_first: Vec<EnvironmentEvent>,
        reporter: &impl ProgressReporter,
    ) -> usize {
        let mut emitted = 0;
        for event in newest_first.into_iter().rev() {
            if self.seen.contains(&event) {
                continue;
            }
            reporter.event(&event);
            self.seen.insert(event.clone());
            self.logged.push(event);
            emitted += 1;
        }
        emitted
    }
}
