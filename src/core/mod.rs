//! Core business logic module
//!
//! This module contains the two lookup engines and their shared publishing primitive:
//! - `config_store` - Sectioned configuration store
//! - `pricing_index` - Time-windowed SKU price index
//! - `snapshot` - Build-then-publish snapshots for readers

pub mod config_store;
pub mod pricing_index;
pub mod snapshot;

pub use config_store::{ConfigStore, DEFAULT_CONFIG};
pub use pricing_index::{PricingIndex, DEFAULT_PRICING_TSV};
pub use snapshot::Snapshot;
