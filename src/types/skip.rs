//! Reasons a source line was tolerated and skipped
//!
//! Skips are never surfaced as errors. Loaders log them at debug level and
//! return them in their reports so callers and tests can inspect them.

use std::fmt;

/// Why a line of input was ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// A config property line appeared before any section header
    NoCurrentSection {
        /// 1-based line number in the source
        line: u64,
    },

    /// A pricing row did not split into exactly four tab-separated fields
    FieldCount {
        /// 1-based line number in the source
        line: u64,
        /// Number of fields the row actually had
        found: usize,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoCurrentSection { line } => {
                write!(f, "line {}: property outside of any section", line)
            }
            SkipReason::FieldCount { line, found } => {
                write!(f, "line {}: expected 4 fields, found {}", line, found)
            }
        }
    }
}
