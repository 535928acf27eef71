//! Presentation sinks: where the anomaly sequence (or any record list) is displayed.

use crate::error::Result;
use crate::source::LogRecord;
use std::io::Write;

pub trait PresentationSink {
    fn present(&mut self, title: &str, records: &[LogRecord]) -> Result<()>;

    /// Called instead of `present` when triage found nothing.
    fn present_none(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Console layout: a title line, then `timestamp - level - message` per record.
/// An empty list prints the title alone.
pub struct TextSink<W: Write> {
    out: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl TextSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> PresentationSink for TextSink<W> {
    fn present(&mut self, title: &str, records: &[LogRecord]) -> Result<()> {
        writeln!(self.out, "\n{}:", title)?;
        for r in records {
            writeln!(self.out, "{}", r)?;
        }
        self.out.flush()?;
        Ok(())
    }

    fn present_none(&mut self) -> Result<()> {
        writeln!(self.out, "\nNo anomalies found.")?;
        self.out.flush()?;
        Ok(())
    }
}

/// One JSON object per record (ndjson); the title is not written.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl JsonLinesSink<std::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(std::io::stdout())
    }
}

impl<W: Write> PresentationSink for JsonLinesSink<W> {
    fn present(&mut self, _title: &str, records: &[LogRecord]) -> Result<()> {
        for r in records {
            let line = serde_json::to_string(r)?;
            writeln!(self.out, "{}", line)?;
        }
        self.out.flush()?;
        Ok(())
    }
}
