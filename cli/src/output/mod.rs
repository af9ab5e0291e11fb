//! Operator log output: subscriber setup and the tracing-backed reporter.

pub mod reporter;

use anyhow::Result;
use console::Term;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::ChronoLocal;

pub use reporter::TracingReporter;

/// Log output flags shared by both tools.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogOptions {
    /// Only warnings and errors.
    pub quiet: bool,
    /// Include debug detail (raw status values, request URLs).
    pub verbose: bool,
    /// Disable ANSI colour.
    pub no_color: bool,
}

impl LogOptions {
    /// Default filter directive when `RUST_LOG` is not set.
    #[must_use]
    pub fn default_directive(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    /// Whether colour should be used on stderr.
    #[must_use]
    pub fn use_ansi(&self) -> bool {
        !self.no_color && std::env::var_os("NO_COLOR").is_none() && Term::stderr().is_term()
    }
}

/// Install the global subscriber: `<time> <LEVEL> <message>` on stderr.
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(opts: LogOptions) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(opts.default_directive()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(opts.use_ansi())
        .with_target(false)
        .with_timer(ChronoLocal::new("%Y-%m-%d %H:%M:%S".to_string()))
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to initialise logging: {e}"))
}
