//! Logging configuration and initialization

use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Default log filter for a verbosity level
pub fn log_level(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Initialize tracing for the CLI
///
/// Logs go to stderr so stdout only carries CSV output. `RUST_LOG` overrides
/// the verbosity flag when set.
pub fn init_logging(verbose: u8) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbose >= 2)
        .with_line_number(verbose >= 3)
        .init();

    debug!("Logging initialized with verbosity level: {}", verbose);
}
