//! Tests for uploading a package and registering a version.

#![allow(clippy::expect_used)]

use std::path::{Path, PathBuf};

use eb_release::application::services::publish::{PublishRequest, publish_app_version};
use eb_release::domain::default_description;

use crate::mocks::{ManualClock, RecordingBlobStore, RecordingReporter, ScriptedPlatform, t0};

fn package(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, b"PK\x03\x04").expect("write package");
    path
}

fn request<'a>(package: &'a Path, description: Option<&'a str>) -> PublishRequest<'a> {
    PublishRequest {
        application: "shop",
        version: "1.4.0",
        description,
        bucket: "artifacts",
        package,
    }
}

#[tokio::test]
async fn test_publish_uploads_under_timestamped_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    let war = package(dir.path(), "shop.war");
    let platform = ScriptedPlatform::new(vec![]);
    let blobs = RecordingBlobStore::default();
    let reporter = RecordingReporter::default();

    let version = publish_app_version(
        &platform,
        &blobs,
        &ManualClock::new(),
        &reporter,
        request(&war, None),
    )
    .await
    .expect("publish");

    let key = format!("shop-{}.war", t0().timestamp());
    assert_eq!(blobs.uploads(), [(war, "artifacts".to_string(), key.clone())]);
    assert_eq!(version.source_bundle.s3_bucket, "artifacts");
    assert_eq!(version.source_bundle.s3_key, key);
    assert!(reporter.contains("Publish Complete!"));
}

#[tokio::test]
async fn test_publish_registers_version_with_default_description() {
    let dir = tempfile::tempdir().expect("tempdir");
    let war = package(dir.path(), "shop.war");
    let platform = ScriptedPlatform::new(vec![]);

    publish_app_version(
        &platform,
        &RecordingBlobStore::default(),
        &ManualClock::new(),
        &RecordingReporter::default(),
        request(&war, None),
    )
    .await
    .expect("publish");

    let created = platform.created();
    assert_eq!(created.len(), 1);
    let (application, body) = &created[0];
    assert_eq!(application, "shop");
    assert_eq!(body.version_label, "1.4.0");
    assert_eq!(body.description, default_description("1.4.0", t0()));
    assert!(!body.auto_create_application);
    assert!(body.process);
}

#[tokio::test]
async fn test_publish_uses_supplied_description() {
    let dir = tempfile::tempdir().expect("tempdir");
    let war = package(dir.path(), "shop.war");
    let platform = ScriptedPlatform::new(vec![]);

    publish_app_version(
        &platform,
        &RecordingBlobStore::default(),
        &ManualClock::new(),
        &RecordingReporter::default(),
        request(&war, Some("hotfix for checkout")),
    )
    .await
    .expect("publish");

    assert_eq!(platform.created()[0].1.description, "hotfix for checkout");
}

#[tokio::test]
async fn test_publish_missing_package_makes_no_remote_calls() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("missing.war");
    let platform = ScriptedPlatform::new(vec![]);
    let blobs = RecordingBlobStore::default();

    let err = publish_app_version(
        &platform,
        &blobs,
        &ManualClock::new(),
        &RecordingReporter::default(),
        request(&missing, None),
    )
    .await
    .expect_err("missing package");

    assert!(err.to_string().contains("Cannot locate package"), "got: {err}");
    assert!(blobs.uploads().is_empty());
    assert!(platform.calls().is_empty());
}

#[tokio::test]
async fn test_failed_upload_skips_registration() {
    let dir = tempfile::tempdir().expect("tempdir");
    let war = package(dir.path(), "shop.war");
    let platform = ScriptedPlatform::new(vec![]);

    let err = publish_app_version(
        &platform,
        &RecordingBlobStore::failing(),
        &ManualClock::new(),
        &RecordingReporter::default(),
        request(&war, None),
    )
    .await
    .expect_err("upload fails");

    assert!(format!("{err:#}").contains("AccessDenied"));
    assert!(platform.calls().is_empty());
}

#[tokio::test]
async fn test_rejected_version_leaves_uploaded_object() {
    let dir = tempfile::tempdir().expect("tempdir");
    let war = package(dir.path(), "shop.war");
    let platform = ScriptedPlatform::new(vec![]).rejecting_create();
    let blobs = RecordingBlobStore::default();
    let reporter = RecordingReporter::default();

    let err = publish_app_version(
        &platform,
        &blobs,
        &ManualClock::new(),
        &reporter,
        request(&war, None),
    )
    .await
    .expect_err("create rejected");

    assert!(format!("{err:#}").contains("already exists"));
    assert_eq!(blobs.uploads().len(), 1);
    assert!(!reporter.contains("Publish Complete!"));
}

#[tokio::test]
async fn test_package_without_extension_gets_bare_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    let bundle = package(dir.path(), "bundle");
    let blobs = RecordingBlobStore::default();

    publish_app_version(
        &ScriptedPlatform::new(vec![]),
        &blobs,
        &ManualClock::new(),
        &RecordingReporter::default(),
        request(&bundle, None),
    )
    .await
    .expect("publish");

    assert_eq!(blobs.uploads()[0].2, format!("bundle-{}", t0().timestamp()));
}
