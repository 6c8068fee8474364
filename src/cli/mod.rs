// CLI module
// Command-line interface, argument parsing, command execution and logging setup

mod args;
mod commands;
mod logging;

pub use args::{CliArgs, Command, StrategyType};
pub use commands::run;
pub use logging::{init_logging, log_level};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments, missing subcommand, or `--help`),
/// clap prints an error or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
