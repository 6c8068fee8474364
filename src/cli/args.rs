use crate::io::tsv_format::parse_time_of_day;
use crate::strategy::BatchConfig;
use chrono::NaiveTime;
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Look up configuration sections and time-windowed SKU prices
#[derive(Parser, Debug)]
#[command(name = "pricing-engine")]
#[command(about = "Look up configuration sections and time-windowed SKU prices", long_about = None)]
pub struct CliArgs {
    /// Load strategy used to read source files
    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "sync",
        global = true,
        help = "Load strategy: 'sync' for blocking reads or 'async' for batched tokio reads"
    )]
    pub strategy: StrategyType,

    /// Number of pricing rows per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        global = true,
        help = "Number of pricing rows read per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Queries supported by the CLI
#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Print one configuration section
    Section {
        /// Section name (case sensitive)
        name: String,

        /// Config file path; the bundled default is used when omitted
        #[arg(long = "config", value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Print every configuration section
    Sections {
        /// Config file path; the bundled default is used when omitted
        #[arg(long = "config", value_name = "PATH")]
        config: Option<PathBuf>,
    },

    /// Resolve the price of a SKU
    Price {
        /// SKU identifier
        sku: String,

        /// Time of day (HH:MM); without it the first loaded price is shown
        #[arg(long = "time", value_name = "HH:MM", value_parser = parse_time_of_day)]
        time: Option<NaiveTime>,

        /// Pricing TSV path; the bundled default is used when omitted
        #[arg(long = "pricing", value_name = "PATH")]
        pricing: Option<PathBuf>,
    },

    /// Print the whole pricing index
    Prices {
        /// Pricing TSV path; the bundled default is used when omitted
        #[arg(long = "pricing", value_name = "PATH")]
        pricing: Option<PathBuf>,
    },
}

/// Available load strategies
#[derive(Clone, Debug, PartialEq, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Create a BatchConfig from CLI arguments, falling back to defaults
    pub fn to_batch_config(&self) -> BatchConfig {
        match self.batch_size {
            Some(batch_size) => BatchConfig::new(batch_size),
            None => BatchConfig::default(),
        }
    }
}
