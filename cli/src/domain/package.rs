//! Storage key and description rules for published packages.

use std::path::Path;

use chrono::{DateTime, Local, Utc};

use crate::domain::error::PackageError;

/// Derive the object key for a package upload.
///
/// The timestamp (unix seconds) is inserted between the file stem and its
/// extension, so `dist/app.war` published at `1700000000` becomes
/// `app-1700000000.war`. Any leading directories are dropped.
///
/// # Errors
///
/// Returns [`PackageError::NoFileName`] if the path ends in `..` or is empty.
pub fn storage_key(package: &Path, at: DateTime<Utc>) -> Result<String, PackageError> {
    let stem = package
        .file_stem()
        .ok_or_else(|| PackageError::NoFileName(package.to_path_buf()))?
        .to_string_lossy();
    let ts = at.timestamp();
    Ok(match package.extension() {
        Some(ext) => format!("{stem}-{ts}.{}", ext.to_string_lossy()),
        None => format!("{stem}-{ts}"),
    })
}

/// Description used when the operator does not supply one.
#[must_use]
pub fn default_description(version: &str, at: DateTime<Utc>) -> String {
    let local = at.with_timezone(&Local);
    format!(
        "{version} was published at {}",
        local.format("%d-%b-%Y %H:%M:%S")
    )
}
