//! Application service: publish a new application version.
//!
//! Imports only from `crate::domain` and `crate::application::ports`.

use std::path::Path;

use anyhow::{Context, Result};
use eb_api_types::{ApplicationVersion, CreateApplicationVersionRequest, SourceBundle};

use crate::application::ports::{BlobStore, Clock, ProgressReporter, VersionRegistry};
use crate::domain::{PackageError, default_description, storage_key};

/// Inputs of one publish.
#[derive(Debug, Clone, Copy)]
pub struct PublishRequest<'a> {
    pub application: &'a str,
    pub version: &'a str,
    pub description: Option<&'a str>,
    pub bucket: &'a str,
    pub package: &'a Path,
}

/// Fail fast when the package file is missing, before anything remote.
///
/// # Errors
///
/// Returns [`PackageError::NotFound`] if `package` is not a regular file.
pub fn ensure_package_exists(package: &Path) -> Result<(), PackageError> {
    if package.is_file() {
        Ok(())
    } else {
        Err(PackageError::NotFound(package.to_path_buf()))
    }
}

/// Upload the package and register it as a new application version.
///
/// An upload that succeeds followed by a failed registration leaves the
/// object in the bucket.
///
/// # Errors
///
/// Returns an error if the package is missing, the upload fails, or the
/// platform rejects the new version.
pub async fn publish_app_version(
    registry: &impl VersionRegistry,
    blobs: &impl BlobStore,
    clock: &impl Clock,
    reporter: &impl ProgressReporter,
    request: PublishRequest<'_>,
) -> Result<ApplicationVersion> {
    ensure_package_exists(request.package)?;

    reporter.step(&format!(
        "Publishing version {} for '{}'",
        request.version, request.application
    ));

    reporter.step(&format!(
        "Uploading {} to s3://{}",
        request.package.display(),
        request.bucket
    ));
    let key = upload_package(blobs, clock, request.package, request.bucket).await?;
    reporter.success(&format!(
        "Package {} has been uploaded to s3://{}/{key}",
        request.package.display(),
        request.bucket
    ));

    let version = create_app_version(registry, clock, request, &key).await?;
    reporter.success(&format!(
        "Application version {} created successfully",
        version.version_label
    ));

    reporter.success("Publish Complete!");
    Ok(version)
}

/// Upload under a timestamped key so repeated publishes never collide.
///
/// # Errors
///
/// Returns an error if the key cannot be derived or the upload fails.
pub async fn upload_package(
    blobs: &impl BlobStore,
    clock: &impl Clock,
    package: &Path,
    bucket: &str,
) -> Result<String> {
    let key = storage_key(package, clock.now())?;
    blobs
        .upload(package, bucket, &key)
        .await
        .with_context(|| format!("uploading {} to s3://{bucket}/{key}", package.display()))?;
    Ok(key)
}

/// Register the uploaded bundle as a version of the application.
///
/// # Errors
///
/// Returns an error if the platform rejects the version.
pub async fn create_app_version(
    registry: &impl VersionRegistry,
    clock: &impl Clock,
    request: PublishRequest<'_>,
    key: &str,
) -> Result<ApplicationVersion> {
    let description = request.description.map_or_else(
        || default_description(request.version, clock.now()),
        str::to_owned,
    );

    let body = CreateApplicationVersionRequest {
        version_label: request.version.to_string(),
        description,
        source_bundle: SourceBundle {
            s3_bucket: request.bucket.to_string(),
            s3_key: key.to_string(),
        },
        auto_create_application: false,
        process: true,
    };

    registry
        .create_application_version(request.application, &body)
        .await
        .with_context(|| {
            format!(
                "creating version {} of {}",
                request.version, request.application
            )
        })
}
