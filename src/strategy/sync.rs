//! Synchronous load strategy
//!
//! Reads source files with blocking std I/O on the calling thread:
//! - Configuration through `io::config_format::parse_config`
//! - Pricing rows through `SyncReader` (iterator interface)

use crate::core::{ConfigStore, PricingIndex};
use crate::io::sync_reader::{open_buffered, SyncReader};
use crate::io::tsv_format::{LoadReport, PricingTableBuilder};
use crate::strategy::LoadStrategy;
use crate::types::{EngineError, Sections};
use std::path::Path;
use tracing::debug;

/// Synchronous load strategy
///
/// # Examples
///
/// ```no_run
/// use rust_pricing_engine::core::PricingIndex;
/// use rust_pricing_engine::strategy::{LoadStrategy, SyncLoadStrategy};
/// use std::path::Path;
///
/// let index = PricingIndex::new();
/// SyncLoadStrategy
///     .load_pricing(Path::new("pricing_data.tsv"), &index)
///     .expect("Load failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncLoadStrategy;

impl LoadStrategy for SyncLoadStrategy {
    fn load_config(&self, path: &Path, store: &ConfigStore) -> Result<Sections, EngineError> {
        debug!(path = %path.display(), "Loading configuration");
        store.parse(open_buffered(path)?)
    }

    fn load_pricing(&self, path: &Path, index: &PricingIndex) -> Result<LoadReport, EngineError> {
        debug!(path = %path.display(), "Loading pricing data");
        let mut builder = PricingTableBuilder::new();

        for row in SyncReader::from_path(path)? {
            builder.push(row?);
        }

        Ok(index.publish(builder))
    }
}
