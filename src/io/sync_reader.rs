//! Synchronous TSV reader with iterator interface
//!
//! Provides a streaming iterator over converted pricing rows.
//! Delegates row conversion to the tsv_format module.
//!
//! # Design
//!
//! The first line of the source is consumed raw before the `csv` reader sees
//! anything, so it is dropped exactly once whatever it contains (even a blank
//! line or a data row). The remaining lines go through a tab-delimited
//! `csv::Reader` with quoting disabled and flexible field counts, so each line
//! splits on tabs only.
//!
//! ```no_run
//! use rust_pricing_engine::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::from_path(Path::new("pricing_data.tsv")).unwrap();
//! for row in reader {
//!     match row {
//!         Ok(outcome) => println!("Row: {:?}", outcome),
//!         Err(e) => eprintln!("Load aborted: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal open errors are returned from the constructors
//! - Malformed times or prices are yielded as Err variants; callers stop there
//! - Rows with the wrong field count are yielded as `RowOutcome::Skipped`

use crate::io::tsv_format::{convert_tsv_row, RowOutcome};
use crate::types::EngineError;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Synchronous pricing TSV reader
#[derive(Debug)]
pub struct SyncReader<R: Read> {
    reader: csv::Reader<BufReader<R>>,
    record: csv::StringRecord,
}

impl SyncReader<File> {
    /// Open a pricing file and drop its header line
    pub fn from_path(path: &Path) -> Result<Self, EngineError> {
        let file = File::open(path).map_err(|e| EngineError::open_error(path, e))?;
        Self::new(file)
    }
}

impl<R: Read> SyncReader<R> {
    /// Wrap a readable source and drop its first line
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` positioned at the first data row
    /// * `Err(EngineError)` if reading the header line failed
    pub fn new(source: R) -> Result<Self, EngineError> {
        let mut buffered = BufReader::with_capacity(8 * 1024, source);
        let mut header = Vec::new();
        buffered.read_until(b'\n', &mut header)?;

        let reader = ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .from_reader(buffered);

        Ok(Self {
            reader,
            record: csv::StringRecord::new(),
        })
    }
}

impl<R: Read> Iterator for SyncReader<R> {
    type Item = Result<RowOutcome, EngineError>;

    /// Read and convert the next data row
    ///
    /// Line numbers count the dropped header, so they match the source file.
    fn next(&mut self) -> Option<Self::Item> {
        match self.reader.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                let line = self
                    .record
                    .position()
                    .map(|pos| pos.line() + 1)
                    .unwrap_or_default();
                let fields: Vec<&str> = self.record.iter().collect();
                Some(convert_tsv_row(&fields, line))
            }
            Err(e) => Some(Err(e.into())),
        }
    }
}

/// Open a file for buffered line reading
pub fn open_buffered(path: &Path) -> Result<BufReader<File>, EngineError> {
    let file = File::open(path).map_err(|e| EngineError::open_error(path, e))?;
    Ok(BufReader::new(file))
}
