//! eb-publish - upload a package and register it as a new application version

use std::process::ExitCode;

use clap::Parser;
use eb_release::cli::PublishCli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = PublishCli::parse();
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
