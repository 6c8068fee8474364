//! Asynchronous load strategy
//!
//! This module provides an async implementation of the LoadStrategy trait for
//! callers that read sources through tokio (for example an upload handler).
//!
//! # Architecture
//!
//! ```text
//! AsyncLoadStrategy
//!     ├── BatchConfig (batch_size)
//!     ├── tokio::fs::File + tokio-util compat
//!     ├── AsyncReader (batched TSV rows) / read_config (config lines)
//!     └── PricingTableBuilder / ConfigParser → one published snapshot
//! ```
//!
//! The blocking `LoadStrategy` methods run the async pipeline on a private
//! current-thread runtime and return an error when called from inside a
//! runtime; async callers must use `load_config_async` and
//! `load_pricing_async` instead.

use crate::core::{ConfigStore, PricingIndex};
use crate::io::async_reader::{read_config, AsyncReader};
use crate::io::tsv_format::{LoadReport, PricingTableBuilder};
use crate::strategy::LoadStrategy;
use crate::types::{EngineError, Sections};
use std::path::Path;
use tokio_util::compat::TokioAsyncReadCompatExt;
use tracing::{debug, warn};

/// Configuration for batched reading
#[derive(Clone, Debug, PartialEq)]
pub struct BatchConfig {
    /// Number of pricing rows read per batch
    pub batch_size: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { batch_size: 1000 }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig; a zero batch size falls back to the default
    pub fn new(batch_size: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size, default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        Self { batch_size }
    }
}

/// Asynchronous load strategy
#[derive(Debug, Clone)]
pub struct AsyncLoadStrategy {
    config: BatchConfig,
}

impl AsyncLoadStrategy {
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }

    /// Parse a configuration file and replace the store's sections
    pub async fn load_config_async(
        &self,
        path: &Path,
        store: &ConfigStore,
    ) -> Result<Sections, EngineError> {
        debug!(path = %path.display(), "Loading configuration (async)");
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| EngineError::open_error(path, e))?;

        let parsed = read_config(file.compat()).await?;
        Ok(store.publish(parsed))
    }

    /// Load a pricing file batch by batch and replace the index
    ///
    /// Rows are accumulated off to the side; the index only changes after the
    /// last batch has been read successfully.
    pub async fn load_pricing_async(
        &self,
        path: &Path,
        index: &PricingIndex,
    ) -> Result<LoadReport, EngineError> {
        debug!(
            path = %path.display(),
            batch_size = self.config.batch_size,
            "Loading pricing data (async)"
        );
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|e| EngineError::open_error(path, e))?;

        let mut reader = AsyncReader::new(file.compat()).await?;
        let mut builder = PricingTableBuilder::new();

        loop {
            let batch = reader.read_batch(self.config.batch_size).await?;
            if batch.is_empty() {
                break;
            }
            for row in batch {
                builder.push(row);
            }
        }

        Ok(index.publish(builder))
    }

    /// Private runtime for the blocking trait methods; fails when called from
    /// inside a tokio runtime
    fn runtime(&self) -> Result<tokio::runtime::Runtime, EngineError> {
        if tokio::runtime::Handle::try_current().is_ok() {
            return Err(EngineError::IoError {
                message: "Blocking load called inside a tokio runtime; use load_config_async or load_pricing_async".to_string(),
            });
        }

        tokio::runtime::Builder::new_current_thread()
            .build()
            .map_err(|e| EngineError::IoError {
                message: format!("Failed to create tokio runtime: {}", e),
            })
    }
}

/// Blocking entry points for callers outside any tokio runtime
///
/// Code already running on a runtime must await
/// [`AsyncLoadStrategy::load_config_async`] or
/// [`AsyncLoadStrategy::load_pricing_async`]; these methods return an
/// `IoError` there.
impl LoadStrategy for AsyncLoadStrategy {
    fn load_config(&self, path: &Path, store: &ConfigStore) -> Result<Sections, EngineError> {
        self.runtime()?
            .block_on(self.load_config_async(path, store))
    }

    fn load_pricing(&self, path: &Path, index: &PricingIndex) -> Result<LoadReport, EngineError> {
        self.runtime()?
            .block_on(self.load_pricing_async(path, index))
    }
}
