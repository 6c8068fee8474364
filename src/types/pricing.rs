//! Pricing types for time-windowed SKU prices
//!
//! This module defines the half-open price interval and the resolution rules
//! applied to a SKU's interval list.
//!
//! # Resolution
//!
//! Intervals are kept in the order they were loaded. A timed lookup scans the
//! whole list and the **last** interval containing the time wins, regardless of
//! how narrow it is or where it starts. An untimed lookup returns the first
//! loaded interval's price.

use chrono::NaiveTime;
use std::collections::HashMap;

/// Stock-keeping unit identifier
pub type SkuId = String;

/// Every loaded interval, grouped by SKU in load order
pub type PricingTable = HashMap<SkuId, Vec<PriceInterval>>;

/// A price valid during `[start, end)` of the day
#[derive(Debug, Clone, PartialEq)]
pub struct PriceInterval {
    /// The SKU this interval belongs to
    pub sku: SkuId,

    /// Inclusive start of the interval
    pub start: NaiveTime,

    /// Exclusive end of the interval
    pub end: NaiveTime,

    /// Price during the interval (zero and negative values are kept as-is)
    pub price: f64,
}

impl PriceInterval {
    pub fn new(sku: impl Into<SkuId>, start: NaiveTime, end: NaiveTime, price: f64) -> Self {
        PriceInterval {
            sku: sku.into(),
            start,
            end,
            price,
        }
    }

    /// Whether `time` falls within `[start, end)`
    ///
    /// An interval whose end is not after its start contains nothing.
    pub fn contains(&self, time: NaiveTime) -> bool {
        time >= self.start && time < self.end
    }
}

/// Resolve the price at `time` using last-match-wins over load order
///
/// Returns `None` ("not set") when no interval contains `time`.
pub fn price_at(intervals: &[PriceInterval], time: NaiveTime) -> Option<f64> {
    let mut price = None;
    for interval in intervals {
        if interval.contains(time) {
            price = Some(interval.price);
        }
    }
    price
}

/// Price of the first loaded interval, or `None` for an empty list
///
/// This is not a "current" price; it is simply the first row loaded.
pub fn first_price(intervals: &[PriceInterval]) -> Option<f64> {
    intervals.first().map(|interval| interval.price)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn t(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, "%H:%M").unwrap()
    }

    fn interval(start: &str, end: &str, price: f64) -> PriceInterval {
        PriceInterval::new("u00006541", t(start), t(end), price)
    }

    #[rstest]
    #[case::at_start("10:00", true)]
    #[case::inside("10:07", true)]
    #[case::last_minute("10:14", true)]
    #[case::at_end("10:15", false)]
    #[case::before("09:59", false)]
    #[case::after("11:00", false)]
    fn test_contains_is_half_open(#[case] time: &str, #[case] expected: bool) {
        assert_eq!(interval("10:00", "10:15", 101.0).contains(t(time)), expected);
    }

    #[test]
    fn test_inverted_interval_contains_nothing() {
        let inverted = interval("12:00", "11:00", 5.0);
        assert!(!inverted.contains(t("11:30")));
        assert!(!inverted.contains(t("12:00")));
    }

    #[rstest]
    #[case::inside_narrow_later_row("10:07", Some(99.0))]
    #[case::outer_only("10:03", Some(101.0))]
    #[case::narrow_end_exclusive("10:10", Some(101.0))]
    #[case::narrow_start_inclusive("10:05", Some(99.0))]
    #[case::outside_all("10:20", None)]
    fn test_price_at_last_match_wins(#[case] time: &str, #[case] expected: Option<f64>) {
        let intervals = vec![interval("10:00", "10:15", 101.0), interval("10:05", "10:10", 99.0)];
        assert_eq!(price_at(&intervals, t(time)), expected);
    }

    #[test]
    fn test_later_wide_interval_overrides_earlier_narrow_one() {
        let intervals = vec![interval("10:05", "10:10", 99.0), interval("10:00", "10:15", 101.0)];
        assert_eq!(price_at(&intervals, t("10:07")), Some(101.0));
    }

    #[test]
    fn test_first_price_uses_load_order() {
        let intervals = vec![interval("10:05", "10:10", 99.0), interval("10:00", "10:15", 101.0)];
        assert_eq!(first_price(&intervals), Some(99.0));
        assert_eq!(first_price(&[]), None);
    }

    #[test]
    fn test_zero_and_negative_prices_resolve() {
        let intervals = vec![interval("00:00", "12:00", 0.0), interval("06:00", "07:00", -3.0)];
        assert_eq!(price_at(&intervals, t("01:00")), Some(0.0));
        assert_eq!(price_at(&intervals, t("06:30")), Some(-3.0));
    }
}
