//! CSV output for lookups and snapshots
//!
//! This module centralizes all output format concerns:
//! - Section rows (`section,key,kind,value`)
//! - Price lookup rows (`sku,time,price`)
//! - Pricing snapshot rows (`sku,start,end,price`)
//!
//! Output is sorted wherever the underlying mapping is unordered, so results
//! are deterministic. Interval order within a SKU is load order and is kept.

use crate::io::tsv_format::format_time_of_day;
use crate::types::{ConfigSection, PricingTable, Sections};
use chrono::NaiveTime;
use serde::Serialize;
use std::io::Write;

/// Text printed when no interval applies
pub const NOT_SET: &str = "NOT SET";

#[derive(Debug, Serialize)]
struct SectionRow<'a> {
    section: &'a str,
    key: &'a str,
    kind: &'static str,
    value: String,
}

#[derive(Debug, Serialize)]
struct PriceRow<'a> {
    sku: &'a str,
    time: String,
    price: String,
}

#[derive(Debug, Serialize)]
struct IntervalRow<'a> {
    sku: &'a str,
    start: String,
    end: String,
    price: String,
}

fn headerless_writer(output: &mut dyn Write) -> csv::Writer<&mut dyn Write> {
    csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(output)
}

fn section_rows(section: &ConfigSection) -> Vec<SectionRow<'_>> {
    let mut rows: Vec<SectionRow<'_>> = section
        .properties
        .iter()
        .map(|(key, value)| SectionRow {
            section: &section.name,
            key,
            kind: "scalar",
            value: value.clone(),
        })
        .chain(section.array_properties.iter().map(|(key, values)| SectionRow {
            section: &section.name,
            key,
            kind: "list",
            value: values.join(","),
        }))
        .collect();

    // scalar row first when a key has both shapes
    rows.sort_by(|a, b| {
        a.key
            .cmp(b.key)
            .then_with(|| (a.kind == "list").cmp(&(b.kind == "list")))
    });
    rows
}

fn write_section_rows<'a, I>(sections: I, output: &mut dyn Write) -> Result<(), String>
where
    I: IntoIterator<Item = &'a ConfigSection>,
{
    let mut writer = headerless_writer(output);

    writer
        .write_record(["section", "key", "kind", "value"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for section in sections {
        for row in section_rows(section) {
            writer
                .serialize(row)
                .map_err(|e| format!("Failed to write section record: {}", e))?;
        }
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))
}

/// Write one section's properties
///
/// Scalar and list properties are written as separate rows; list values are
/// joined with `,`. Rows are sorted by key, scalar before list.
pub fn write_section_csv(section: &ConfigSection, output: &mut dyn Write) -> Result<(), String> {
    write_section_rows([section], output)
}

/// Write every section, sorted by section name
pub fn write_sections_csv(sections: &Sections, output: &mut dyn Write) -> Result<(), String> {
    let mut sorted: Vec<&ConfigSection> = sections.values().collect();
    sorted.sort_by(|a, b| a.name.cmp(&b.name));
    write_section_rows(sorted, output)
}

/// Write a single price lookup result
///
/// An untimed lookup leaves the time column empty; an unset price prints
/// as `NOT SET`.
pub fn write_price_csv(
    sku: &str,
    time: Option<NaiveTime>,
    price: Option<f64>,
    output: &mut dyn Write,
) -> Result<(), String> {
    let mut writer = headerless_writer(output);

    writer
        .write_record(["sku", "time", "price"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    writer
        .serialize(PriceRow {
            sku,
            time: time.map(format_time_of_day).unwrap_or_default(),
            price: price.map_or_else(|| NOT_SET.to_string(), |p| p.to_string()),
        })
        .map_err(|e| format!("Failed to write price record: {}", e))?;

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))
}

/// Write the whole pricing index, SKUs sorted, intervals in load order
pub fn write_pricing_csv(table: &PricingTable, output: &mut dyn Write) -> Result<(), String> {
    let mut writer = headerless_writer(output);

    writer
        .write_record(["sku", "start", "end", "price"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut skus: Vec<&String> = table.keys().collect();
    skus.sort();

    for sku in skus {
        for interval in &table[sku] {
            writer
                .serialize(IntervalRow {
                    sku,
                    start: format_time_of_day(interval.start),
                    end: format_time_of_day(interval.end),
                    price: interval.price.to_string(),
                })
                .map_err(|e| format!("Failed to write interval record: {}", e))?;
        }
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PriceInterval;
    use rstest::rstest;

    fn t(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut dyn Write) -> Result<(), String>,
    {
        let mut output = Vec::new();
        f(&mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_write_section_csv_sorted_rows() {
        let mut section = ConfigSection::new("CXO");
        section.add_property("topic", "single");
        section.add_property("broker", "http://cxobroker.in");
        section.add_array_property("topic", vec!["a".to_string(), "b".to_string()]);

        let output = render(|out| write_section_csv(&section, out));
        assert_eq!(
            output,
            "section,key,kind,value\n\
             CXO,broker,scalar,http://cxobroker.in\n\
             CXO,topic,scalar,single\n\
             CXO,topic,list,\"a,b\"\n"
        );
    }

    #[test]
    fn test_write_sections_csv_sorted_by_name() {
        let mut sections = Sections::new();
        let mut b = ConfigSection::new("B");
        b.add_property("k", "2");
        let mut a = ConfigSection::new("A");
        a.add_property("k", "1");
        sections.insert("B".to_string(), b);
        sections.insert("A".to_string(), a);
        sections.insert("Empty".to_string(), ConfigSection::new("Empty"));

        let output = render(|out| write_sections_csv(&sections, out));
        assert_eq!(output, "section,key,kind,value\nA,k,scalar,1\nB,k,scalar,2\n");
    }

    #[rstest]
    #[case::timed(Some(t(10, 7)), Some(99.0), "u1,10:07,99\n")]
    #[case::untimed(None, Some(101.5), "u1,,101.5\n")]
    #[case::large(Some(t(10, 7)), Some(1e30), "u1,10:07,1000000000000000000000000000000\n")]
    #[case::not_set(Some(t(23, 0)), None, "u1,23:00,NOT SET\n")]
    fn test_write_price_csv(
        #[case] time: Option<NaiveTime>,
        #[case] price: Option<f64>,
        #[case] expected_row: &str,
    ) {
        let output = render(|out| write_price_csv("u1", time, price, out));
        assert_eq!(output, format!("sku,time,price\n{}", expected_row));
    }

    #[test]
    fn test_write_pricing_csv_keeps_load_order() {
        let mut table = PricingTable::new();
        table.insert(
            "b".to_string(),
            vec![PriceInterval::new("b", t(1, 0), t(2, 0), 0.0)],
        );
        table.insert(
            "a".to_string(),
            vec![
                PriceInterval::new("a", t(10, 5), t(10, 10), 99.0),
                PriceInterval::new("a", t(10, 0), t(10, 15), 101.0),
            ],
        );

        let output = render(|out| write_pricing_csv(&table, out));
        assert_eq!(
            output,
            "sku,start,end,price\n\
             a,10:05,10:10,99\n\
             a,10:00,10:15,101\n\
             b,01:00,02:00,0\n"
        );
    }

    #[test]
    fn test_write_pricing_csv_empty() {
        let output = render(|out| write_pricing_csv(&PricingTable::new(), out));
        assert_eq!(output, "sku,start,end,price\n");
    }
}
