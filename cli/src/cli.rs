//! CLI argument parsing with clap derive

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::builder::FalseyValueParser;
use clap::{Args, Parser};

use crate::app::AppContext;
use crate::application::ports::ConfigStore;
use crate::commands;
use crate::domain::ReleaseConfig;
use crate::infra::config::YamlConfigStore;
use crate::output::{LogOptions, init_logging};

/// Flags shared by both tools.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Platform control API base URL (overrides platform.endpoint)
    #[arg(long, env = "EB_RELEASE_ENDPOINT")]
    pub endpoint: Option<String>,

    /// Only log warnings and errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Log debug detail
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR", value_parser = FalseyValueParser::new())]
    pub no_color: bool,
}

impl GlobalArgs {
    fn log_options(&self) -> LogOptions {
        LogOptions {
            quiet: self.quiet,
            verbose: self.verbose,
            no_color: self.no_color,
        }
    }

    fn apply(&self, config: &mut ReleaseConfig) {
        if let Some(endpoint) = &self.endpoint {
            config.platform.endpoint.clone_from(endpoint);
        }
    }
}

/// Load the config file, apply overrides, and validate the result.
fn load_config(apply: impl FnOnce(&mut ReleaseConfig)) -> Result<ReleaseConfig> {
    let store = YamlConfigStore;
    let mut config = store.load().context("loading configuration")?;
    apply(&mut config);
    config.validate()?;
    Ok(config)
}

/// Publish a new application version
#[derive(Parser, Debug)]
#[command(
    name = "eb-publish",
    version,
    after_help = "The specified package file should be suitable for the type of application \
                  environment being used. Eg. for Tomcat environments this is usually a war \
                  file, but could be a zip."
)]
pub struct PublishCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub args: commands::publish::PublishArgs,
}

impl PublishCli {
    /// Execute `eb-publish`.
    ///
    /// # Errors
    ///
    /// Returns an error if logging cannot be set up, configuration is invalid,
    /// or a remote call fails.
    pub async fn run(self) -> Result<ExitCode> {
        init_logging(self.global.log_options())?;
        let config = load_config(|c| self.global.apply(c))?;
        let app = AppContext::new(config)?;
        commands::publish::run(&app, &self.args).await
    }
}

/// Deploy an existing application version to an existing environment
#[derive(Parser, Debug)]
#[command(
    name = "eb-deploy",
    version,
    after_help = "Known limitation:\n  Single instance environments may report a failure if a \
                  'Rolling' deployment is used. This is due to the environment health not \
                  remaining green when there are 0 active instances. The workaround is to use \
                  a 'Rolling with additional batch' deployment to keep the environment green."
)]
pub struct DeployCli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(flatten)]
    pub args: commands::deploy::DeployArgs,

    /// Seconds the environment must stay healthy after the update (overrides deploy.soak_secs)
    #[arg(long, value_name = "SECS")]
    pub soak: Option<u64>,

    /// Seconds between status polls (overrides deploy.poll_interval_secs)
    #[arg(long, value_name = "SECS")]
    pub poll_interval: Option<u64>,

    /// Give up waiting for 'Ready' after this many seconds; waits forever when unset
    /// (overrides deploy.ready_timeout_secs)
    #[arg(long, value_name = "SECS")]
    pub ready_timeout: Option<u64>,
}

impl DeployCli {
    fn apply(&self, config: &mut ReleaseConfig) {
        self.global.apply(config);
        if let Some(soak) = self.soak {
            config.deploy.soak_secs = soak;
        }
        if let Some(interval) = self.poll_interval {
            config.deploy.poll_interval_secs = interval;
        }
        if let Some(timeout) = self.ready_timeout {
            config.deploy.ready_timeout_secs = Some(timeout);
        }
    }

    /// Execute `eb-deploy`.
    ///
    /// # Errors
    ///
    /// Returns an error if logging cannot be set up, configuration is invalid,
    /// or a remote call fails.
    pub async fn run(self) -> Result<ExitCode> {
        init_logging(self.global.log_options())?;
        let config = load_config(|c| self.apply(c))?;
        let app = AppContext::new(config)?;
        commands::deploy::run(&app, &self.args).await
    }
}
