//! `eb-publish`: upload a package and register it as an application version.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::{BlobStore, Clock, PlatformControl, ProgressReporter};
use crate::application::services::publish::{PublishRequest, publish_app_version};
use crate::domain::PackageError;

/// Arguments for the publish command.
#[derive(Args, Debug, Clone)]
pub struct PublishArgs {
    /// The application which owns the new version
    #[arg(short = 'a', long)]
    pub application_name: String,

    /// The name (label) of the new version to create
    #[arg(short = 'v', long)]
    pub version_label: String,

    /// The description of the new version to create
    #[arg(short = 'd', long)]
    pub version_description: Option<String>,

    /// The S3 bucket to store the software package into
    #[arg(short = 'b', long = "s3-bucket")]
    pub s3_bucket: String,

    /// The local software package file to publish
    #[arg(short = 'f', long)]
    pub package_file: PathBuf,
}

/// Run `eb-publish`.
///
/// Returns exit code 1 without contacting the platform when the package file
/// does not exist.
///
/// # Errors
///
/// Returns an error if the upload or version registration fails.
pub async fn run<P, B, C, R>(app: &AppContext<P, B, C, R>, args: &PublishArgs) -> Result<ExitCode>
where
    P: PlatformControl,
    B: BlobStore,
    C: Clock,
    R: ProgressReporter,
{
    let request = PublishRequest {
        application: &args.application_name,
        version: &args.version_label,
        description: args.version_description.as_deref(),
        bucket: &args.s3_bucket,
        package: &args.package_file,
    };
    match publish_app_version(&app.platform, &app.blobs, &app.clock, &app.reporter, request).await
    {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) if is_missing_package(&e) => {
            app.reporter.error(&e.to_string());
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e),
    }
}

fn is_missing_package(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<PackageError>(),
        Some(PackageError::NotFound(_))
    )
}
