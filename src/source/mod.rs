//! Log records and the producers that supply them.
//! The pipeline only sees a [`Batch`]; where it came from is the caller's business.

mod jsonl;
mod synthetic;

use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

pub use jsonl::JsonLinesSource;
pub use synthetic::SyntheticSource;

/// Timestamp layout used by the producers, millisecond precision.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

/// Severity tag. Unrecognized strings are kept verbatim in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Level {
    Info,
    Warn,
    Error,
    Other(String),
}

impl Level {
    pub fn as_str(&self) -> &str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Other(s) => s.as_str(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Level::Error)
    }
}

impl From<&str> for Level {
    fn from(s: &str) -> Self {
        match s {
            "INFO" => Level::Info,
            "WARN" => Level::Warn,
            "ERROR" => Level::Error,
            other => Level::Other(other.to_string()),
        }
    }
}

impl From<String> for Level {
    fn from(s: String) -> Self {
        let known = matches!(s.as_str(), "INFO" | "WARN" | "ERROR");
        if known {
            Level::from(s.as_str())
        } else {
            Level::Other(s)
        }
    }
}

impl From<Level> for String {
    fn from(level: Level) -> Self {
        match level {
            Level::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single log line. Identity is the full field tuple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: String,
    pub level: Level,
    pub message: String,
}

impl LogRecord {
    pub fn new(timestamp: impl Into<String>, level: impl Into<Level>, message: impl Into<String>) -> Self {
        Self {
            timestamp: timestamp.into(),
            level: level.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LogRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.timestamp, self.level, self.message)
    }
}

/// Records of one invocation in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Batch {
    records: Vec<LogRecord>,
}

impl Batch {
    pub fn new(records: Vec<LogRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LogRecord> {
        self.records.iter()
    }
}

impl From<Vec<LogRecord>> for Batch {
    fn from(records: Vec<LogRecord>) -> Self {
        Self::new(records)
    }
}

impl FromIterator<LogRecord> for Batch {
    fn from_iter<I: IntoIterator<Item = LogRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Batch {
    type Item = &'a LogRecord;
    type IntoIter = std::slice::Iter<'a, LogRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Record producer: yields one finite batch per call.
pub trait RecordSource {
    fn read_batch(&mut self) -> Result<Batch>;
}
