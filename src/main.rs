//! Pricing Engine CLI
//!
//! Command-line interface for looking up configuration sections and SKU prices.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- sections
//! cargo run -- section "Order Service" --config config.txt
//! cargo run -- price u00006541 --time 10:07
//! cargo run -- --strategy async prices --pricing pricing_data.tsv
//! ```
//!
//! Omitting `--config`/`--pricing` uses the data bundled with the binary.
//! Results are written to stdout as CSV; logs go to stderr.
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (file not found, malformed pricing row, unknown SKU or section, etc.)

use rust_pricing_engine::cli;
use std::process;

fn main() {
    let args = cli::parse_args();
    cli::init_logging(args.verbose);

    let mut output = std::io::stdout();
    if let Err(e) = cli::run(&args, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
