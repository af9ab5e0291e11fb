//! Shared fakes for unit tests.
//!
//! Provides a scripted platform, a manual clock, a recording blob store and a
//! recording reporter so each test file doesn't re-define the same
//! boilerplate.

#![allow(dead_code, clippy::expect_used)]

use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use eb_api_types::{
    ApplicationVersion, CreateApplicationVersionRequest, EnvironmentDescription,
    EnvironmentEvent, EnvironmentHealth, EnvironmentStatus, EventSeverity,
    UpdateEnvironmentResponse,
};
use eb_release::application::ports::{
    BlobStore, Clock, EnvironmentInspector, EnvironmentUpdater, ProgressReporter,
    VersionRegistry,
};

pub const ENV_ID: &str = "e-abc123";
pub const REQUEST_ID: &str = "req-7f3c";

// ── Builders ──────────────────────────────────────────────────────────────────

pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0)
        .single()
        .expect("valid timestamp")
}

pub fn env(status: EnvironmentStatus, health: EnvironmentHealth, version: &str) -> EnvironmentDescription {
    EnvironmentDescription {
        environment_id: ENV_ID.to_string(),
        environment_name: Some("shop-prod".to_string()),
        status,
        health,
        version_label: Some(version.to_string()),
    }
}

pub fn status(s: EnvironmentStatus) -> EnvironmentDescription {
    env(s, EnvironmentHealth::Grey, "v1")
}

pub fn ready(health: EnvironmentHealth, version: &str) -> EnvironmentDescription {
    env(EnvironmentStatus::Ready, health, version)
}

pub fn event(offset_secs: i64, message: &str) -> EnvironmentEvent {
    EnvironmentEvent {
        event_date: t0() + chrono::Duration::seconds(offset_secs),
        severity: EventSeverity::Info,
        message: message.to_string(),
        request_id: REQUEST_ID.to_string(),
        application_name: Some("shop".to_string()),
        environment_name: Some("shop-prod".to_string()),
        version_label: None,
    }
}

// ── Fake: scripted platform ───────────────────────────────────────────────────

/// Serves descriptions and event batches from scripts, one per call.
///
/// The last entry of each script repeats once the script runs out.
pub struct ScriptedPlatform {
    descriptions: Mutex<VecDeque<EnvironmentDescription>>,
    event_batches: Mutex<VecDeque<Vec<EnvironmentEvent>>>,
    reject_update: bool,
    reject_create: bool,
    calls: Mutex<Vec<String>>,
    created: Mutex<Vec<(String, CreateApplicationVersionRequest)>>,
}

impl ScriptedPlatform {
    pub fn new(descriptions: Vec<EnvironmentDescription>) -> Self {
        Self {
            descriptions: Mutex::new(descriptions.into()),
            event_batches: Mutex::new(VecDeque::new()),
            reject_update: false,
            reject_create: false,
            calls: Mutex::new(Vec::new()),
            created: Mutex::new(Vec::new()),
        }
    }

    pub fn with_events(self, batches: Vec<Vec<EnvironmentEvent>>) -> Self {
        *self.event_batches.lock().expect("lock") = batches.into();
        self
    }

    pub fn rejecting_update(mut self) -> Self {
        self.reject_update = true;
        self
    }

    pub fn rejecting_create(mut self) -> Self {
        self.reject_create = true;
        self
    }

    /// Every call in order: `update`, `describe`, `events`, `create`.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.calls().iter().filter(|c| *c == name).count()
    }

    pub fn created(&self) -> Vec<(String, CreateApplicationVersionRequest)> {
        self.created.lock().expect("lock").clone()
    }

    fn record(&self, name: &str) {
        self.calls.lock().expect("lock").push(name.to_string());
    }
}

fn next_or_last<T: Clone>(queue: &Mutex<VecDeque<T>>) -> Option<T> {
    let mut q = queue.lock().expect("lock");
    if q.len() > 1 { q.pop_front() } else { q.front().cloned() }
}

impl EnvironmentUpdater for ScriptedPlatform {
    async fn update_environment(
        &self,
        application: &str,
        environment: &str,
        version: &str,
    ) -> Result<UpdateEnvironmentResponse> {
        self.record("update");
        if self.reject_update {
            anyhow::bail!("No Application Version named '{version}' found for {application}/{environment}");
        }
        Ok(UpdateEnvironmentResponse {
            environment_id: ENV_ID.to_string(),
            request_id: REQUEST_ID.to_string(),
        })
    }
}

impl EnvironmentInspector for ScriptedPlatform {
    async fn describe_environment(&self, environment_id: &str) -> Result<EnvironmentDescription> {
        self.record("describe");
        assert_eq!(environment_id, ENV_ID);
        next_or_last(&self.descriptions).ok_or_else(|| anyhow::anyhow!("no description scripted"))
    }

    async fn describe_events(
        &self,
        request_id: &str,
        min_severity: EventSeverity,
    ) -> Result<Vec<EnvironmentEvent>> {
        self.record("events");
        assert_eq!(request_id, REQUEST_ID);
        assert_eq!(min_severity, EventSeverity::Info);
        // Platform order: newest first.
        let mut batch = next_or_last(&self.event_batches).unwrap_or_default();
        batch.reverse();
        Ok(batch)
    }
}

impl VersionRegistry for ScriptedPlatform {
    async fn create_application_version(
        &self,
        application: &str,
        request: &CreateApplicationVersionRequest,
    ) -> Result<ApplicationVersion> {
        self.record("create");
        if self.reject_create {
            anyhow::bail!("Application Version {} already exists", request.version_label);
        }
        self.created
            .lock()
            .expect("lock")
            .push((application.to_string(), request.clone()));
        Ok(ApplicationVersion {
            application_name: application.to_string(),
            version_label: request.version_label.clone(),
            description: request.description.clone(),
            source_bundle: request.source_bundle.clone(),
            date_created: Some(t0()),
        })
    }
}

// ── Fake: manual clock ────────────────────────────────────────────────────────

/// Clock whose `sleep` returns immediately and advances `now`.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
    sleeps: Mutex<Vec<Duration>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::at(t0())
    }

    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
            sleeps: Mutex::new(Vec::new()),
        }
    }

    pub fn sleeps(&self) -> Vec<Duration> {
        self.sleeps.lock().expect("lock").clone()
    }

    pub fn elapsed(&self) -> chrono::Duration {
        *self.now.lock().expect("lock") - t0()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().expect("lock")
    }

    async fn sleep(&self, duration: Duration) {
        self.sleeps.lock().expect("lock").push(duration);
        *self.now.lock().expect("lock") += chrono::Duration::from_std(duration).expect("duration");
    }
}

// ── Fake: recording blob store ────────────────────────────────────────────────

#[derive(Default)]
pub struct RecordingBlobStore {
    uploads: Mutex<Vec<(PathBuf, String, String)>>,
    fail: bool,
}

impl RecordingBlobStore {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn uploads(&self) -> Vec<(PathBuf, String, String)> {
        self.uploads.lock().expect("lock").clone()
    }
}

impl BlobStore for RecordingBlobStore {
    async fn upload(&self, local: &Path, bucket: &str, key: &str) -> Result<()> {
        if self.fail {
            anyhow::bail!("AccessDenied");
        }
        self.uploads
            .lock()
            .expect("lock")
            .push((local.to_path_buf(), bucket.to_string(), key.to_string()));
        Ok(())
    }
}

// ── Fake: recording reporter ──────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Step(String),
    Success(String),
    Error(String),
    Event(String),
}

#[derive(Default)]
pub struct RecordingReporter {
    lines: Mutex<Vec<Line>>,
}

impl RecordingReporter {
    pub fn lines(&self) -> Vec<Line> {
        self.lines.lock().expect("lock").clone()
    }

    /// Messages of emitted platform events, in emission order.
    pub fn events(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|l| match l {
                Line::Event(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn errors(&self) -> Vec<String> {
        self.lines()
            .into_iter()
            .filter_map(|l| match l {
                Line::Error(m) => Some(m),
                _ => None,
            })
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines().iter().any(|l| match l {
            Line::Step(m) | Line::Success(m) | Line::Error(m) | Line::Event(m) => {
                m.contains(needle)
            }
        })
    }

    fn push(&self, line: Line) {
        self.lines.lock().expect("lock").push(line);
    }
}

impl ProgressReporter for RecordingReporter {
    fn step(&self, message: &str) {
        self.push(Line::Step(message.to_string()));
    }
    fn success(&self, message: &str) {
        self.push(Line::Success(message.to_string()));
    }
    fn error(&self, message: &str) {
        self.push(Line::Error(message.to_string()));
    }
    fn event(&self, event: &EnvironmentEvent) {
        self.push(Line::Event(event.message.clone()));
    }
}
