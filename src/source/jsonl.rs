//! JSON-lines producer: one `{"timestamp","level","message"}` object per line.

use super::{Batch, LogRecord, RecordSource};
use crate::error::{Result, TriageError};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

pub struct JsonLinesSource<R> {
    reader: BufReader<R>,
}

impl JsonLinesSource<File> {
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(File::open(path)?))
    }
}

impl<R: Read> JsonLinesSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader: BufReader::new(reader),
        }
    }
}

impl<R: Read> RecordSource for JsonLinesSource<R> {
    /// Read to end of input. Blank lines are skipped; line numbers in errors are 1-based.
    fn read_batch(&mut self) -> Result<Batch> {
        let mut records = Vec::new();
        for (idx, line) in (&mut self.reader).lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: LogRecord = serde_json::from_str(&line)
                .map_err(|source| TriageError::Record { line: idx + 1, source })?;
            records.push(record);
        }
        tracing::debug!(count = records.len(), "read json-lines batch");
        Ok(Batch::new(records))
    }
}
