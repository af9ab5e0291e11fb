//! eb-deploy - roll an application version out to an environment and verify it

use std::process::ExitCode;

use clap::Parser;
use eb_release::cli::DeployCli;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = DeployCli::parse();
    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
