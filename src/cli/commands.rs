//! Command execution
//!
//! Loads the source a command needs (a file through the selected strategy, or
//! the bundled default) and writes the query result as CSV.

use crate::cli::args::{CliArgs, Command};
use crate::core::{ConfigStore, PricingIndex};
use crate::io::csv_format::{
    write_price_csv, write_pricing_csv, write_section_csv, write_sections_csv,
};
use crate::strategy::{create_strategy, LoadStrategy};
use std::io::Write;
use std::path::Path;
use tracing::info;

fn load_config(
    strategy: &dyn LoadStrategy,
    path: Option<&Path>,
    store: &ConfigStore,
) -> Result<(), String> {
    match path {
        Some(path) => strategy
            .load_config(path, store)
            .map(|_| ())
            .map_err(|e| e.to_string()),
        None => {
            store.load_default();
            Ok(())
        }
    }
}

fn load_pricing(
    strategy: &dyn LoadStrategy,
    path: Option<&Path>,
    index: &PricingIndex,
) -> Result<(), String> {
    let report = match path {
        Some(path) => strategy.load_pricing(path, index),
        None => index.load_default(),
    }
    .map_err(|e| e.to_string())?;

    for reason in &report.skipped {
        info!("Skipped pricing {}", reason);
    }
    Ok(())
}

/// Execute the parsed command, writing CSV to `output`
///
/// # Errors
///
/// Returns a message for load failures, unknown sections and unknown SKUs.
pub fn run(args: &CliArgs, output: &mut dyn Write) -> Result<(), String> {
    let strategy = create_strategy(args.strategy.clone(), Some(args.to_batch_config()));

    match &args.command {
        Command::Section { name, config } => {
            let store = ConfigStore::new();
            load_config(strategy.as_ref(), config.as_deref(), &store)?;
            let section = store
                .get_section(name)
                .ok_or_else(|| format!("Section '{}' not found", name))?;
            write_section_csv(&section, output)
        }
        Command::Sections { config } => {
            let store = ConfigStore::new();
            load_config(strategy.as_ref(), config.as_deref(), &store)?;
            write_sections_csv(&store.list_sections(), output)
        }
        Command::Price { sku, time, pricing } => {
            let index = PricingIndex::new();
            load_pricing(strategy.as_ref(), pricing.as_deref(), &index)?;
            let price = index.resolve(sku, *time).map_err(|e| e.to_string())?;
            write_price_csv(sku, *time, price, output)
        }
        Command::Prices { pricing } => {
            let index = PricingIndex::new();
            load_pricing(strategy.as_ref(), pricing.as_deref(), &index)?;
            write_pricing_csv(&index.all_data(), output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use rstest::rstest;

    fn run_args(args: &[&str]) -> Result<String, String> {
        let args = CliArgs::try_parse_from(args).unwrap();
        let mut output = Vec::new();
        run(&args, &mut output)?;
        Ok(String::from_utf8(output).unwrap())
    }

    #[rstest]
    #[case::overlap_later_row(&["program", "price", "u00006541", "--time", "10:07"], "u00006541,10:07,99\n")]
    #[case::overlap_outer(&["program", "price", "u00006541", "--time", "10:03"], "u00006541,10:03,101\n")]
    #[case::untimed_first_row(&["program", "price", "u00006541"], "u00006541,,101\n")]
    #[case::not_set(&["program", "price", "u00006541", "--time", "10:15"], "u00006541,10:15,NOT SET\n")]
    fn test_price_with_default_data(#[case] args: &[&str], #[case] expected_row: &str) {
        assert_eq!(
            run_args(args).unwrap(),
            format!("sku,time,price\n{}", expected_row)
        );
    }

    #[test]
    fn test_price_unknown_sku() {
        let error = run_args(&["program", "price", "unknownSku"]).unwrap_err();
        assert_eq!(error, "SKU 'unknownSku' not found");
    }

    #[test]
    fn test_section_with_default_config() {
        let output = run_args(&["program", "section", "Order Service"]).unwrap();
        assert_eq!(
            output,
            "section,key,kind,value\n\
             Order Service,broker,scalar,https://orbroker.in\n\
             Order Service,topic,list,\"test_os_topic_1,test_os_topic_2\"\n"
        );
    }

    #[test]
    fn test_section_not_found() {
        let error = run_args(&["program", "section", "Missing"]).unwrap_err();
        assert_eq!(error, "Section 'Missing' not found");
    }

    #[test]
    fn test_missing_pricing_file() {
        let error = run_args(&["program", "prices", "--pricing", "nonexistent.tsv"]).unwrap_err();
        assert_eq!(error, "File not found: nonexistent.tsv");
    }
}
