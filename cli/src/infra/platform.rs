//! Platform control plane client: implements the platform ports over
//! HTTP/JSON with `reqwest`.

use std::time::Duration;

use anyhow::{Context, Result};
use eb_api_types::{
    ApiErrorBody, ApplicationVersion, CreateApplicationVersionRequest, DescribeEventsResponse,
    EnvironmentDescription, EnvironmentEvent, EventSeverity, UpdateEnvironmentRequest,
    UpdateEnvironmentResponse,
};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::application::ports::{EnvironmentInspector, EnvironmentUpdater, VersionRegistry};
use crate::domain::{PlatformConfig, PlatformError};

/// Production platform client.
pub struct HttpPlatformClient {
    http: Client,
    base: Url,
}

impl HttpPlatformClient {
    /// Build a client for the configured endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid base URL or the HTTP
    /// client cannot be constructed.
    pub fn new(cfg: &PlatformConfig) -> Result<Self> {
        let base = Url::parse(&cfg.endpoint)
            .with_context(|| format!("invalid platform endpoint: {}", cfg.endpoint))?;
        anyhow::ensure!(
            !base.cannot_be_a_base(),
            "platform endpoint cannot be used as a base URL: {}",
            cfg.endpoint
        );
        let http = Client::builder()
            .timeout(Duration::from_secs(cfg.request_timeout_secs))
            .user_agent(concat!("eb-release/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("building HTTP client")?;
        Ok(Self { http, base })
    }

    /// Append percent-encoded path segments to the endpoint.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|()| anyhow::anyhow!("platform endpoint cannot be a base URL"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

/// Decode a JSON body, turning non-2xx responses into [`PlatformError`].
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if status.is_success() {
        return response
            .json::<T>()
            .await
            .context("decoding platform response");
    }

    let body = response.text().await.unwrap_or_default();
    let err = match serde_json::from_str::<ApiErrorBody>(&body) {
        Ok(api) => PlatformError::Rejected {
            status: status.as_u16(),
            code: api.code,
            message: api.message,
        },
        Err(_) => PlatformError::Http {
            status: status.as_u16(),
            body,
        },
    };
    Err(err.into())
}

impl EnvironmentUpdater for HttpPlatformClient {
    async fn update_environment(
        &self,
        application: &str,
        environment: &str,
        version: &str,
    ) -> Result<UpdateEnvironmentResponse> {
        let url = self.url(&["applications", application, "environments", environment, "update"])?;
        debug!(%url, version, "requesting environment update");
        let response = self
            .http
            .post(url)
            .json(&UpdateEnvironmentRequest {
                version_label: version.to_string(),
            })
            .send()
            .await
            .context("sending update request")?;
        decode(response).await
    }
}

impl EnvironmentInspector for HttpPlatformClient {
    async fn describe_environment(&self, environment_id: &str) -> Result<EnvironmentDescription> {
        let url = self.url(&["environments", environment_id])?;
        let response = self
            .http
            .get(url)
            .send()
            .await
            .context("sending describe request")?;
        decode(response).await
    }

    async fn describe_events(
        &self,
        request_id: &str,
        min_severity: EventSeverity,
    ) -> Result<Vec<EnvironmentEvent>> {
        let url = self.url(&["events"])?;
        let response = self
            .http
            .get(url)
            .query(&[("request_id", request_id), ("severity", min_severity.as_str())])
            .send()
            .await
            .context("sending events request")?;
        let body: DescribeEventsResponse = decode(response).await?;
        Ok(body.events)
    }
}

impl VersionRegistry for HttpPlatformClient {
    async fn create_application_version(
        &self,
        application: &str,
        request: &CreateApplicationVersionRequest,
    ) -> Result<ApplicationVersion> {
        let url = self.url(&["applications", application, "versions"])?;
        debug!(%url, version = %request.version_label, "registering application version");
        let response = self
            .http
            .post(url)
            .json(request)
            .send()
            .await
            .context("sending create version request")?;
        decode(response).await
    }
}
