//! `eb-deploy`: roll an existing version out to an environment and verify it.

use std::process::ExitCode;

use anyhow::Result;
use clap::Args;

use crate::app::AppContext;
use crate::application::ports::{Clock, PlatformControl, ProgressReporter};
use crate::application::services::deploy::{DeployRequest, perform_environment_update};

/// Arguments for the deploy command.
#[derive(Args, Debug, Clone)]
pub struct DeployArgs {
    /// The application which owns the target environment
    #[arg(short = 'a', long)]
    pub application_name: String,

    /// The environment which should be updated
    #[arg(short = 'e', long)]
    pub environment_name: String,

    /// The application version which should be applied to the environment
    #[arg(short = 'v', long)]
    pub version_label: String,
}

/// Run `eb-deploy`.
///
/// Returns exit code 1 when the rollout completes but fails verification
/// (rollback, health never settled, health regression, ready timeout).
///
/// # Errors
///
/// Returns an error if the platform rejects the update or a status call fails.
pub async fn run<P, B, C, R>(app: &AppContext<P, B, C, R>, args: &DeployArgs) -> Result<ExitCode>
where
    P: PlatformControl,
    C: Clock,
    R: ProgressReporter,
{
    let request = DeployRequest {
        application: &args.application_name,
        environment: &args.environment_name,
        version: &args.version_label,
    };
    let report = perform_environment_update(
        &app.platform,
        &app.clock,
        &app.reporter,
        request,
        app.deploy_settings(),
    )
    .await?;

    if report.verdict.is_passed() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
