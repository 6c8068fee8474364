//! Rust Pricing Engine Library
//! # Overview
//!
//! This library parses two flat-file formats into in-memory lookups:
//! a sectioned key/value configuration and a tab-separated, time-windowed
//! SKU price table.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (ConfigSection, PriceInterval, errors)
//! - [`cli`] - CLI arguments, command execution and logging
//! - [`core`] - The lookup engines:
//!   - [`core::config_store`] - Section lookups over the latest configuration
//!   - [`core::pricing_index`] - Price resolution over the latest pricing table
//!   - [`core::snapshot`] - Build-then-publish snapshots
//! - [`io`] - Source formats, readers and CSV output
//! - [`strategy`] - Sync and async file loading
//!
//! # Price Resolution
//!
//! - **Timed**: among the SKU's `[start, end)` intervals containing the time,
//!   the one loaded last wins
//! - **Untimed**: the first interval loaded for the SKU
//! - **Unknown SKU**: `EngineError::SkuNotFound`
//!
//! # Reloads
//!
//! Every load replaces the engine's whole state. The new state is built first
//! and published in one step; a failed load leaves the previous state visible.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod strategy;
pub mod types;

pub use self::core::{ConfigStore, PricingIndex};
pub use io::LoadReport;
pub use types::{ConfigSection, EngineError, PriceInterval, PricingTable, Sections, SkipReason};
