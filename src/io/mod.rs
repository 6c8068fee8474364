//! I/O module
//!
//! Handles source parsing and output.
//!
//! # Components
//!
//! - `config_format` - Sectioned config line classification and accumulation
//! - `tsv_format` - Pricing row conversion, time and price parsing
//! - `csv_format` - CSV output for lookups and snapshots
//! - `sync_reader` - Synchronous TSV reader with iterator interface
//! - `async_reader` - Asynchronous TSV batch reader and config reader

pub mod async_reader;
pub mod config_format;
pub mod csv_format;
pub mod sync_reader;
pub mod tsv_format;

pub use async_reader::AsyncReader;
pub use config_format::{parse_config, parse_config_str, ConfigParser, ParsedConfig};
pub use csv_format::{write_price_csv, write_pricing_csv, write_section_csv, write_sections_csv};
pub use sync_reader::SyncReader;
pub use tsv_format::{
    convert_tsv_row, format_time_of_day, parse_price, parse_time_of_day, LoadReport,
    PricingTableBuilder, RowOutcome,
};
