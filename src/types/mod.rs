//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `config`: Configuration sections
//! - `pricing`: Price intervals and resolution rules
//! - `skip`: Reasons for tolerated, skipped input lines
//! - `error`: Error types for the engines

pub mod config;
pub mod error;
pub mod pricing;
pub mod skip;

pub use config::{ConfigSection, Sections};
pub use error::EngineError;
pub use pricing::{first_price, price_at, PriceInterval, PricingTable, SkuId};
pub use skip::SkipReason;
