//! Detectors: independent verdict producers over a read-only batch.
//! The combiner only sees the flagged records, never which detector produced them.

mod model;
mod rules;

pub use model::ModelDetector;
pub use rules::RuleMatcher;

use crate::error::Result;
use crate::source::{Batch, LogRecord};
use serde::Serialize;
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictSource {
    Rule,
    Model,
}

impl VerdictSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            VerdictSource::Rule => "rule",
            VerdictSource::Model => "model",
        }
    }
}

/// One detector's call on one record, borrowed from the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnomalyVerdict<'a> {
    pub record: &'a LogRecord,
    pub is_anomalous: bool,
    pub source: VerdictSource,
}

pub trait Detector {
    fn source(&self) -> VerdictSource;

    /// Verdicts for the records this detector considered, in batch order.
    fn score<'a>(&self, batch: &'a Batch) -> Result<Vec<AnomalyVerdict<'a>>>;

    /// Records flagged as anomalous.
    fn flagged<'a>(&self, batch: &'a Batch) -> Result<HashSet<&'a LogRecord>> {
        Ok(flagged(&self.score(batch)?))
    }
}

pub fn flagged<'a>(verdicts: &[AnomalyVerdict<'a>]) -> HashSet<&'a LogRecord> {
    verdicts
        .iter()
        .filter(|v| v.is_anomalous)
        .map(|v| v.record)
        .collect()
}
