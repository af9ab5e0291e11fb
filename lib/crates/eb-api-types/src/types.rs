use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle status reported for an environment.
///
/// Every state other than `Ready` is transient while an update is applied.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EnvironmentStatus {
    Launching,
    Updating,
    Ready,
    Terminating,
    Terminated,
    Aborting,
    LinkingFrom,
    LinkingTo,
    #[serde(other)]
    Unknown,
}

impl EnvironmentStatus {
    #[must_use]
    pub fn is_ready(self) -> bool {
        self == Self::Ready
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Launching => "Launching",
            Self::Updating => "Updating",
            Self::Ready => "Ready",
            Self::Terminating => "Terminating",
            Self::Terminated => "Terminated",
            Self::Aborting => "Aborting",
            Self::LinkingFrom => "LinkingFrom",
            Self::LinkingTo => "LinkingTo",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for EnvironmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Platform-computed health indicator.
///
/// `Grey` means the platform has not settled on a value yet; anything other
/// than `Green` and `Grey` is degraded.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum EnvironmentHealth {
    Green,
    Yellow,
    Red,
    Grey,
    #[serde(other)]
    Unknown,
}

impl EnvironmentHealth {
    #[must_use]
    pub fn is_grey(self) -> bool {
        self == Self::Grey
    }

    #[must_use]
    pub fn is_green(self) -> bool {
        self == Self::Green
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Green => "Green",
            Self::Yellow => "Yellow",
            Self::Red => "Red",
            Self::Grey => "Grey",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for EnvironmentHealth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Event severity, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum EventSeverity {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
    Fatal,
}

impl EventSeverity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "TRACE",
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Fatal => "FATAL",
        }
    }
}

impl fmt::Display for EventSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single line in the event log of an update request.
///
/// Two events are the same event when every field matches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct EnvironmentEvent {
    pub event_date: DateTime<Utc>,
    pub severity: EventSeverity,
    pub message: String,
    pub request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_label: Option<String>,
}

/// Body of `POST /applications/{app}/environments/{env}/update`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateEnvironmentRequest {
    pub version_label: String,
}

/// Accepted update: the environment being changed and the correlation id
/// for its event log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateEnvironmentResponse {
    pub environment_id: String,
    pub request_id: String,
}

/// Current state of an environment as returned by `GET /environments/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnvironmentDescription {
    pub environment_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment_name: Option<String>,
    pub status: EnvironmentStatus,
    pub health: EnvironmentHealth,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_label: Option<String>,
}

/// Response of `GET /events`. Events are ordered newest first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct DescribeEventsResponse {
    #[serde(default)]
    pub events: Vec<EnvironmentEvent>,
}

/// Location of an uploaded package in object storage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SourceBundle {
    pub s3_bucket: String,
    pub s3_key: String,
}

/// Body of `POST /applications/{app}/versions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateApplicationVersionRequest {
    pub version_label: String,
    pub description: String,
    pub source_bundle: SourceBundle,
    /// Create the owning application when it does not exist yet.
    #[serde(default)]
    pub auto_create_application: bool,
    /// Ask the platform to validate the bundle before it becomes deployable.
    #[serde(default)]
    pub process: bool,
}

/// A registered application version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApplicationVersion {
    pub application_name: String,
    pub version_label: String,
    #[serde(default)]
    pub description: String,
    pub source_bundle: SourceBundle,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
}

/// Error body returned with any non-2xx response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}
