//! Sectioned key/value configuration format
//!
//! The format is line oriented and case sensitive:
//!
//! ```text
//! Gateway
//! endpoint = https://xyz.in
//!
//! CXO
//! topic = test_cxo_topic, test_cxo_topic_1
//! ```
//!
//! - Each line is trimmed; blank lines are ignored.
//! - A line without `=` starts a new, empty section under that name, replacing
//!   any earlier section of the same name.
//! - A line with `=` is split at the first `=`; key and value are trimmed.
//!   Values containing a comma become list properties (split on `,`, trailing
//!   empty pieces dropped, each piece trimmed), others scalars.
//! - Property lines before the first section header are skipped.
//!
//! Classification and accumulation are pure (no I/O) so the sync and async
//! loaders share them.

use crate::types::{ConfigSection, EngineError, Sections, SkipReason};
use std::io::BufRead;
use tracing::debug;

/// The classified shape of one config line
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigLine<'a> {
    Blank,
    Header(&'a str),
    Property { key: &'a str, value: PropertyValue },
}

/// Value of a property line
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Scalar(String),
    List(Vec<String>),
}

/// Classify a single raw line
pub fn classify_line(raw: &str) -> ConfigLine<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return ConfigLine::Blank;
    }

    match line.split_once('=') {
        None => ConfigLine::Header(line),
        Some((key, value)) => ConfigLine::Property {
            key: key.trim(),
            value: parse_value(value.trim()),
        },
    }
}

fn parse_value(value: &str) -> PropertyValue {
    if !value.contains(',') {
        return PropertyValue::Scalar(value.to_string());
    }

    let mut pieces: Vec<&str> = value.split(',').collect();
    // drop trailing empty pieces before trimming
    while pieces.last().is_some_and(|piece| piece.is_empty()) {
        pieces.pop();
    }
    PropertyValue::List(pieces.into_iter().map(|piece| piece.trim().to_string()).collect())
}

/// Result of parsing a whole configuration source
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedConfig {
    pub sections: Sections,
    pub skipped: Vec<SkipReason>,
}

/// Incremental builder fed one line at a time
#[derive(Debug, Default)]
pub struct ConfigParser {
    sections: Sections,
    current: Option<String>,
    skipped: Vec<SkipReason>,
    line_num: u64,
}

impl ConfigParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next line of the source
    pub fn push_line(&mut self, raw: &str) {
        self.line_num += 1;

        match classify_line(raw) {
            ConfigLine::Blank => {}
            ConfigLine::Header(name) => {
                self.sections.insert(name.to_string(), ConfigSection::new(name));
                self.current = Some(name.to_string());
            }
            ConfigLine::Property { key, value } => {
                let section = self
                    .current
                    .as_ref()
                    .and_then(|name| self.sections.get_mut(name));

                match section {
                    Some(section) => match value {
                        PropertyValue::Scalar(value) => section.add_property(key, value),
                        PropertyValue::List(values) => section.add_array_property(key, values),
                    },
                    None => {
                        let reason = SkipReason::NoCurrentSection {
                            line: self.line_num,
                        };
                        debug!("Skipping config {}", reason);
                        self.skipped.push(reason);
                    }
                }
            }
        }
    }

    pub fn finish(self) -> ParsedConfig {
        ParsedConfig {
            sections: self.sections,
            skipped: self.skipped,
        }
    }
}

/// Parse a full configuration from a buffered reader
///
/// Fails only when the reader fails (including invalid UTF-8); malformed
/// content never produces an error.
pub fn parse_config<R: BufRead>(reader: R) -> Result<ParsedConfig, EngineError> {
    let mut parser = ConfigParser::new();
    for line in reader.lines() {
        parser.push_line(&line?);
    }
    Ok(parser.finish())
}

/// Parse a configuration held in memory
pub fn parse_config_str(text: &str) -> ParsedConfig {
    let mut parser = ConfigParser::new();
    for line in text.lines() {
        parser.push_line(line);
    }
    parser.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::{self, Read};

    const SAMPLE: &str = "Gateway\n\
        endpoint = https://xyz.in\n\
        certurl = https://cloud.internalportal.com\n\
        download loc =  /home/user/temp\n\
        \n\
        CXO\n\
        endpont = http://internal.cxo.com\n\
        redirect url = \n\
        broker = http://cxobroker.in\n\
        topic = test_cxo_topic, test_cxo_topic_1\n\
        \n\
        Order Service\n\
        broker = https://orbroker.in\n\
        topic = test_os_topic_1, test_os_topic_2";

    fn list(items: &[&str]) -> PropertyValue {
        PropertyValue::List(items.iter().map(|s| s.to_string()).collect())
    }

    #[rstest]
    #[case::blank("", ConfigLine::Blank)]
    #[case::whitespace_only("   \t ", ConfigLine::Blank)]
    #[case::header("Gateway", ConfigLine::Header("Gateway"))]
    #[case::header_trimmed("  Order Service  ", ConfigLine::Header("Order Service"))]
    #[case::scalar(
        "endpoint = https://xyz.in",
        ConfigLine::Property { key: "endpoint", value: PropertyValue::Scalar("https://xyz.in".to_string()) }
    )]
    #[case::split_at_first_equals(
        "url = http://h/?a=b",
        ConfigLine::Property { key: "url", value: PropertyValue::Scalar("http://h/?a=b".to_string()) }
    )]
    #[case::empty_value(
        "redirect url = ",
        ConfigLine::Property { key: "redirect url", value: PropertyValue::Scalar(String::new()) }
    )]
    #[case::empty_key(
        "= orphan",
        ConfigLine::Property { key: "", value: PropertyValue::Scalar("orphan".to_string()) }
    )]
    #[case::list(
        "topic = a , b,c",
        ConfigLine::Property { key: "topic", value: list(&["a", "b", "c"]) }
    )]
    #[case::list_keeps_inner_empty_pieces(
        "topic = a,,b",
        ConfigLine::Property { key: "topic", value: list(&["a", "", "b"]) }
    )]
    #[case::list_drops_trailing_empty_pieces(
        "topic = a,,b,",
        ConfigLine::Property { key: "topic", value: list(&["a", "", "b"]) }
    )]
    #[case::list_of_only_commas_is_empty(
        "topic = ,",
        ConfigLine::Property { key: "topic", value: list(&[]) }
    )]
    #[case::list_keeps_trailing_blank_piece(
        "topic = a, ,",
        ConfigLine::Property { key: "topic", value: list(&["a", ""]) }
    )]
    #[case::list_leading_empty_piece(
        "topic = ,a",
        ConfigLine::Property { key: "topic", value: list(&["", "a"]) }
    )]
    fn test_classify_line(#[case] raw: &str, #[case] expected: ConfigLine<'static>) {
        assert_eq!(classify_line(raw), expected);
    }

    #[test]
    fn test_parse_sample_config() {
        let parsed = parse_config_str(SAMPLE);
        assert_eq!(parsed.sections.len(), 3);
        assert!(parsed.skipped.is_empty());

        let gateway = &parsed.sections["Gateway"];
        assert_eq!(gateway.property("endpoint"), Some("https://xyz.in"));
        assert_eq!(gateway.property("download loc"), Some("/home/user/temp"));

        let cxo = &parsed.sections["CXO"];
        assert_eq!(cxo.property("redirect url"), Some(""));
        assert_eq!(
            cxo.array_property("topic"),
            Some(&["test_cxo_topic".to_string(), "test_cxo_topic_1".to_string()][..])
        );

        let order = &parsed.sections["Order Service"];
        assert_eq!(order.property("broker"), Some("https://orbroker.in"));
        assert_eq!(order.property("topic"), None);
    }

    #[test]
    fn test_repeated_header_discards_earlier_section() {
        let parsed = parse_config_str("A\nx = 1\nB\ny = 2\nA\nz = 3\n");
        let a = &parsed.sections["A"];
        assert_eq!(a.property("x"), None);
        assert_eq!(a.property("z"), Some("3"));
        assert_eq!(parsed.sections["B"].property("y"), Some("2"));
    }

    #[test]
    fn test_blank_lines_do_not_end_section() {
        let parsed = parse_config_str("A\n\n\nx = 1\n");
        assert_eq!(parsed.sections["A"].property("x"), Some("1"));
    }

    #[test]
    fn test_property_before_header_is_skipped() {
        let parsed = parse_config_str("\norphan = 1\nA\nx = 2\n");
        assert_eq!(parsed.sections.len(), 1);
        assert_eq!(
            parsed.skipped,
            vec![SkipReason::NoCurrentSection { line: 2 }]
        );
    }

    #[test]
    fn test_scalar_and_list_forms_of_same_key() {
        let parsed = parse_config_str("A\nk = one\nk = x, y\nk = two\n");
        let a = &parsed.sections["A"];
        assert_eq!(a.property("k"), Some("two"));
        assert_eq!(
            a.array_property("k"),
            Some(&["x".to_string(), "y".to_string()][..])
        );
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let parsed = parse_config_str("A\nk = 1\na\nK = 2\n");
        assert_eq!(parsed.sections.len(), 2);
        assert_eq!(parsed.sections["A"].property("K"), None);
        assert_eq!(parsed.sections["a"].property("K"), Some("2"));
    }

    #[test]
    fn test_parse_config_reader_matches_str() {
        let from_reader = parse_config(SAMPLE.as_bytes()).unwrap();
        assert_eq!(from_reader, parse_config_str(SAMPLE));
    }

    #[test]
    fn test_parse_config_crlf_line_endings() {
        let parsed = parse_config("A\r\nk = 1\r\n".as_bytes()).unwrap();
        assert_eq!(parsed.sections["A"].property("k"), Some("1"));
    }

    struct FailingReader;

    impl Read for FailingReader {
        fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "disk on fire"))
        }
    }

    #[test]
    fn test_parse_config_surfaces_io_failure() {
        let result = parse_config(io::BufReader::new(FailingReader));
        assert!(matches!(result, Err(EngineError::IoError { .. })));
    }

    #[test]
    fn test_parse_config_rejects_invalid_utf8() {
        let bytes: &[u8] = b"A\nk = \xff\xfe\n";
        assert!(matches!(
            parse_config(bytes),
            Err(EngineError::IoError { .. })
        ));
    }
}
