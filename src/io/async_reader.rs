//! Asynchronous readers with batch interface
//!
//! Provides batch reading over pricing rows and a line-stream config reader.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - futures `BufReader` to drop the header line raw, as the sync reader does
//! - csv-async for streaming tab-delimited parsing
//! - Batch reading so callers can yield between chunks of a large upload
//!
//! # Architecture
//!
//! ```text
//! TSV source → AsyncReader → Batches of RowOutcome
//!                   ↓
//!            tsv_format module
//!            (convert_tsv_row)
//! ```

use crate::io::config_format::{ConfigParser, ParsedConfig};
use crate::io::tsv_format::{convert_tsv_row, RowOutcome};
use crate::types::EngineError;
use csv_async::{AsyncReaderBuilder, StringRecord};
use futures::io::{AsyncBufReadExt, AsyncRead, BufReader};
use futures::stream::StreamExt;

/// Asynchronous pricing TSV reader
pub struct AsyncReader<R: AsyncRead + Unpin + Send> {
    csv_reader: csv_async::AsyncReader<BufReader<R>>,
    record: StringRecord,
}

impl<R: AsyncRead + Unpin + Send> AsyncReader<R> {
    /// Create a new AsyncReader, dropping the first line of `source`
    ///
    /// # Returns
    ///
    /// * `Ok(AsyncReader)` positioned at the first data row
    /// * `Err(EngineError)` if reading the header line failed
    pub async fn new(source: R) -> Result<Self, EngineError> {
        let mut buffered = BufReader::new(source);
        let mut header = Vec::new();
        buffered.read_until(b'\n', &mut header).await?;

        let csv_reader = AsyncReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(false)
            .flexible(true)
            .quoting(false)
            .create_reader(buffered);

        Ok(Self {
            csv_reader,
            record: StringRecord::new(),
        })
    }

    /// Read up to `batch_size` converted rows
    ///
    /// Returns an empty vector once the source is exhausted. A malformed time
    /// or price ends the read with an error; rows already returned in earlier
    /// batches must then be discarded by the caller.
    pub async fn read_batch(&mut self, batch_size: usize) -> Result<Vec<RowOutcome>, EngineError> {
        let mut batch = Vec::with_capacity(batch_size);

        while batch.len() < batch_size {
            if !self.csv_reader.read_record(&mut self.record).await? {
                break;
            }
            let line = self
                .record
                .position()
                .map(|pos| pos.line() + 1)
                .unwrap_or_default();
            let fields: Vec<&str> = self.record.iter().collect();
            batch.push(convert_tsv_row(&fields, line)?);
        }

        Ok(batch)
    }
}

/// Read a whole configuration from an async source
pub async fn read_config<R: AsyncRead + Unpin>(source: R) -> Result<ParsedConfig, EngineError> {
    let mut lines = BufReader::new(source).lines();
    let mut parser = ConfigParser::new();

    while let Some(line) = lines.next().await {
        parser.push_line(&line?);
    }

    Ok(parser.finish())
}
