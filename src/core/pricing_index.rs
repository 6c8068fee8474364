//! Pricing index
//!
//! Maps each SKU to its price intervals in load order and resolves prices.
//!
//! # Loading
//!
//! A load reads the whole table into a fresh index and publishes it only when
//! every row has been read. A malformed time or price aborts the load; the
//! partially built index is dropped and the previous one stays visible.
//!
//! # Resolution
//!
//! - With a time: last-match-wins over the SKU's intervals in load order
//!   (see [`price_at`])
//! - Without a time: the price of the first loaded interval (see [`first_price`])
//! - Unknown SKU: [`EngineError::SkuNotFound`]

use crate::core::snapshot::Snapshot;
use crate::io::sync_reader::SyncReader;
use crate::io::tsv_format::{LoadReport, PricingTableBuilder};
use crate::types::{first_price, price_at, EngineError, PriceInterval, PricingTable};
use chrono::NaiveTime;
use std::io::Read;
use tracing::info;

/// Pricing table bundled with the binary
pub const DEFAULT_PRICING_TSV: &str = include_str!("../../data/pricing_data.tsv");

/// Time-windowed price index keyed by SKU
#[derive(Debug, Default)]
pub struct PricingIndex {
    table: Snapshot<PricingTable>,
}

impl PricingIndex {
    /// Create an empty index; nothing is loaded yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a tab-separated pricing table, replacing the whole index
    ///
    /// The first line is always dropped as a header.
    ///
    /// # Returns
    ///
    /// * `Ok(LoadReport)` - Number of intervals loaded and skipped rows
    /// * `Err(EngineError)` - Read failure or malformed time/price; nothing changed
    pub fn load<R: Read>(&self, source: R) -> Result<LoadReport, EngineError> {
        let mut builder = PricingTableBuilder::new();
        for row in SyncReader::new(source)? {
            builder.push(row?);
        }
        Ok(self.publish(builder))
    }

    /// Load a pricing table held in memory
    pub fn load_str(&self, text: &str) -> Result<LoadReport, EngineError> {
        self.load(text.as_bytes())
    }

    /// Replace the index with the bundled default table
    pub fn load_default(&self) -> Result<LoadReport, EngineError> {
        self.load_str(DEFAULT_PRICING_TSV)
    }

    /// Publish a fully built table
    pub fn publish(&self, builder: PricingTableBuilder) -> LoadReport {
        let (table, report) = builder.finish();
        info!(
            skus = table.len(),
            intervals = report.loaded,
            skipped = report.skipped.len(),
            "Pricing data loaded"
        );
        self.table.publish(table);
        report
    }

    /// Resolve the price of `sku`, optionally at a time of day
    ///
    /// # Returns
    ///
    /// * `Ok(Some(price))` - An interval applies
    /// * `Ok(None)` - The SKU is known but no price is set
    /// * `Err(EngineError::SkuNotFound)` - The SKU has no intervals
    pub fn resolve(&self, sku: &str, time: Option<NaiveTime>) -> Result<Option<f64>, EngineError> {
        let table = self
            .table
            .current()
            .ok_or_else(|| EngineError::sku_not_found(sku))?;
        let intervals = table
            .get(sku)
            .ok_or_else(|| EngineError::sku_not_found(sku))?;

        Ok(match time {
            Some(time) => price_at(intervals, time),
            None => first_price(intervals),
        })
    }

    /// Whether `sku` has at least one loaded interval
    pub fn exists(&self, sku: &str) -> bool {
        self.table
            .current()
            .is_some_and(|table| table.get(sku).is_some_and(|intervals| !intervals.is_empty()))
    }

    /// The intervals of one SKU in load order
    pub fn intervals(&self, sku: &str) -> Option<Vec<PriceInterval>> {
        self.table
            .current()
            .and_then(|table| table.get(sku).cloned())
    }

    /// A copy of the whole index; changing it does not affect the index
    pub fn all_data(&self) -> PricingTable {
        self.table
            .current()
            .map(|table| (*table).clone())
            .unwrap_or_default()
    }

    /// Whether any pricing table has been loaded successfully
    pub fn is_loaded(&self) -> bool {
        self.table.is_published()
    }
}
