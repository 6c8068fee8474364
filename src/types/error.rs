//! Error types for the pricing and configuration engines
//!
//! This module defines every error a load or lookup can surface to the caller.
//! Rows the loaders tolerate are not errors; they are reported as
//! [`SkipReason`](crate::types::SkipReason) values instead.
//!
//! # Error Categories
//!
//! - **I/O Errors**: File not found, unreadable stream, invalid UTF-8
//! - **Parse Errors**: Malformed time or price in a structurally valid pricing row
//! - **Lookup Errors**: Unknown SKU

use thiserror::Error;

/// Main error type for the engines
///
/// Load errors abort the whole load and leave the previously published
/// snapshot in place. Lookup errors never change state.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// File not found at the specified path
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading the source
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// Tabular reader failure that is not an I/O error
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Start or end time of a pricing row is not a valid time of day
    #[error("Invalid time '{value}' at line {line}")]
    InvalidTime {
        /// Line number of the offending row
        line: u64,
        /// The raw (trimmed) field value
        value: String,
    },

    /// Price of a pricing row is not a number
    #[error("Invalid price '{value}' at line {line}")]
    InvalidPrice {
        /// Line number of the offending row
        line: u64,
        /// The raw (trimmed) field value
        value: String,
    },

    /// The SKU has no loaded intervals
    #[error("SKU '{sku}' not found")]
    SkuNotFound {
        /// The SKU that was looked up
        sku: String,
    },
}

impl From<std::io::Error> for EngineError {
    fn from(error: std::io::Error) -> Self {
        EngineError::IoError {
            message: error.to_string(),
        }
    }
}

impl From<csv::Error> for EngineError {
    fn from(error: csv::Error) -> Self {
        if error.is_io_error() {
            return EngineError::IoError {
                message: error.to_string(),
            };
        }

        EngineError::ParseError {
            line: error.position().map(|pos| pos.line()),
            message: error.to_string(),
        }
    }
}

impl From<csv_async::Error> for EngineError {
    fn from(error: csv_async::Error) -> Self {
        if error.is_io_error() {
            return EngineError::IoError {
                message: error.to_string(),
            };
        }

        EngineError::ParseError {
            line: error.position().map(|pos| pos.line()),
            message: error.to_string(),
        }
    }
}

impl EngineError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &str) -> Self {
        EngineError::FileNotFound {
            path: path.to_string(),
        }
    }

    /// Create an InvalidTime error
    pub fn invalid_time(line: u64, value: &str) -> Self {
        EngineError::InvalidTime {
            line,
            value: value.to_string(),
        }
    }

    /// Create an InvalidPrice error
    pub fn invalid_price(line: u64, value: &str) -> Self {
        EngineError::InvalidPrice {
            line,
            value: value.to_string(),
        }
    }

    /// Create a SkuNotFound error
    pub fn sku_not_found(sku: &str) -> Self {
        EngineError::SkuNotFound {
            sku: sku.to_string(),
        }
    }

    /// Open a file, mapping a missing file to [`EngineError::FileNotFound`]
    pub fn open_error(path: &std::path::Path, error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::NotFound {
            EngineError::file_not_found(&path.display().to_string())
        } else {
            EngineError::IoError {
                message: format!("Failed to open file '{}': {}", path.display(), error),
            }
        }
    }
}
