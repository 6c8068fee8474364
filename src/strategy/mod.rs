//! Load strategy module
//!
//! This module defines the Strategy pattern for loading the two engines from
//! files. Both strategies feed the same line and row builders and publish one
//! snapshot at the end, so they produce identical results; they differ only in
//! how the file is read.

use crate::cli::StrategyType;
use crate::core::{ConfigStore, PricingIndex};
use crate::io::tsv_format::LoadReport;
use crate::types::{EngineError, Sections};
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncLoadStrategy, BatchConfig};
pub use sync::SyncLoadStrategy;

/// Load strategy trait for reading source files into the engines
///
/// A failed load leaves the target's previously published data untouched.
pub trait LoadStrategy: Send + Sync {
    /// Parse a configuration file and replace the store's sections
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read.
    fn load_config(&self, path: &Path, store: &ConfigStore) -> Result<Sections, EngineError>;

    /// Load a pricing TSV file and replace the index
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or read, or if a
    /// four-field row has a malformed time or price.
    fn load_pricing(&self, path: &Path, index: &PricingIndex) -> Result<LoadReport, EngineError>;
}

/// Create a load strategy based on the specified strategy type
///
/// # Arguments
///
/// * `strategy_type` - The type of load strategy to create (Sync or Async)
/// * `config` - Optional batch configuration (ignored for sync)
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn LoadStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncLoadStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncLoadStrategy::new(config))
        }
    }
}
