//! Tab-separated pricing table format
//!
//! ```text
//! SkuID	StartTime	EndTime	Price
//! u00006541	10:00	10:15	101
//! ```
//!
//! The first line is always discarded as a header, whatever it contains.
//! Every other row is split on tabs and trailing empty fields are dropped;
//! rows without exactly four fields left are skipped. Fields are trimmed,
//! times parse as ISO local times (`HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`) and
//! the price as a finite floating-point number. A bad time or price in a
//! four-field row fails the whole load.
//!
//! All functions are pure (no I/O) for easy testing; the sync and async
//! readers only split rows and hand the fields over.

use crate::types::{EngineError, PriceInterval, PricingTable, SkipReason};
use chrono::{NaiveTime, Timelike};
use tracing::debug;

/// Fraction digits allowed after the seconds (nanosecond precision)
const MAX_FRACTION_DIGITS: usize = 9;

fn is_two_digits(part: &str) -> bool {
    part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit())
}

/// Check the ISO local time shape: `HH:MM`, `HH:MM:SS` or `HH:MM:SS.f{1,9}`
fn has_iso_time_shape(value: &str) -> bool {
    let (hms, fraction) = match value.split_once('.') {
        Some((hms, fraction)) => (hms, Some(fraction)),
        None => (value, None),
    };

    let parts: Vec<&str> = hms.split(':').collect();
    let shape_ok = match (parts.as_slice(), fraction) {
        ([h, m], None) => is_two_digits(h) && is_two_digits(m),
        ([h, m, s], _) => is_two_digits(h) && is_two_digits(m) && is_two_digits(s),
        _ => false,
    };

    shape_ok
        && fraction.map_or(true, |f| {
            (1..=MAX_FRACTION_DIGITS).contains(&f.len()) && f.bytes().all(|b| b.is_ascii_digit())
        })
}

/// Parse a 24-hour ISO local time: `HH:MM`, `HH:MM:SS` or `HH:MM:SS.fff`
///
/// Every field is exactly two digits. Leap seconds (`:60`) are rejected.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, String> {
    let value = value.trim();
    let invalid = || format!("Invalid time '{}', expected HH:MM", value);

    if !has_iso_time_shape(value) {
        return Err(invalid());
    }

    let format = if value.len() == 5 { "%H:%M" } else { "%H:%M:%S%.f" };
    let time = NaiveTime::parse_from_str(value, format).map_err(|_| invalid())?;

    // chrono encodes a leap second as an oversized nanosecond field
    if time.nanosecond() >= 1_000_000_000 {
        return Err(invalid());
    }
    Ok(time)
}

/// Format a time of day as `HH:MM`, keeping seconds (and any fraction) only
/// when non-zero
pub fn format_time_of_day(time: NaiveTime) -> String {
    if time.nanosecond() != 0 {
        time.format("%H:%M:%S%.f").to_string()
    } else if time.second() != 0 {
        time.format("%H:%M:%S").to_string()
    } else {
        time.format("%H:%M").to_string()
    }
}

/// Parse a price as a floating-point number
///
/// Plain and scientific notation are accepted. `NaN`, infinities and values
/// that overflow to infinity are rejected.
pub fn parse_price(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|price| price.is_finite())
}

/// Drop trailing empty fields, as a plain string split on tabs would
fn strip_trailing_empty<'a, 'b>(fields: &'a [&'b str]) -> &'a [&'b str] {
    let len = fields
        .iter()
        .rposition(|field| !field.is_empty())
        .map_or(0, |last| last + 1);
    &fields[..len]
}

/// Outcome of converting one data row
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    Interval(PriceInterval),
    Skipped(SkipReason),
}

/// Convert the fields of one data row
///
/// # Arguments
///
/// * `fields` - The raw tab-separated fields, untrimmed; trailing empty
///   fields do not count
/// * `line` - 1-based line number of the row in the source
///
/// # Returns
///
/// * `Ok(RowOutcome::Interval)` - A well-formed row
/// * `Ok(RowOutcome::Skipped)` - Wrong number of fields
/// * `Err(EngineError)` - Malformed time or price
pub fn convert_tsv_row(fields: &[&str], line: u64) -> Result<RowOutcome, EngineError> {
    let fields = strip_trailing_empty(fields);
    let [sku, start, end, price] = fields else {
        return Ok(RowOutcome::Skipped(SkipReason::FieldCount {
            line,
            found: fields.len(),
        }));
    };

    let start = start.trim();
    let start = parse_time_of_day(start).map_err(|_| EngineError::invalid_time(line, start))?;
    let end = end.trim();
    let end = parse_time_of_day(end).map_err(|_| EngineError::invalid_time(line, end))?;
    let price_str = price.trim();
    let price = parse_price(price_str).ok_or_else(|| EngineError::invalid_price(line, price_str))?;

    Ok(RowOutcome::Interval(PriceInterval::new(
        sku.trim(),
        start,
        end,
        price,
    )))
}

/// Summary of a completed pricing load
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadReport {
    /// Number of intervals appended
    pub loaded: usize,
    /// Rows that were tolerated and ignored
    pub skipped: Vec<SkipReason>,
}

/// Incremental builder for a pricing table
///
/// Rows are appended to their SKU's list in arrival order.
#[derive(Debug, Default)]
pub struct PricingTableBuilder {
    table: PricingTable,
    report: LoadReport,
}

impl PricingTableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convert and record one data row; errors abandon the build
    pub fn push_row(&mut self, fields: &[&str], line: u64) -> Result<(), EngineError> {
        self.push(convert_tsv_row(fields, line)?);
        Ok(())
    }

    /// Record an already converted row
    pub fn push(&mut self, outcome: RowOutcome) {
        match outcome {
            RowOutcome::Interval(interval) => {
                self.table
                    .entry(interval.sku.clone())
                    .or_default()
                    .push(interval);
                self.report.loaded += 1;
            }
            RowOutcome::Skipped(reason) => {
                debug!("Skipping pricing {}", reason);
                self.report.skipped.push(reason);
            }
        }
    }

    pub fn finish(self) -> (PricingTable, LoadReport) {
        (self.table, self.report)
    }
}
