//! Union of flagged sets (plus ERROR records when configured), deduplicated, in batch order.

use crate::config::CombinerConfig;
use crate::source::{Batch, LogRecord};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Ordered, duplicate-free records surfaced to the sink. Carries no detector provenance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnomalySet {
    records: Vec<LogRecord>,
}

impl AnomalySet {
    pub fn records(&self) -> &[LogRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub struct ResultCombiner {
    config: CombinerConfig,
}

impl ResultCombiner {
    pub fn new(config: CombinerConfig) -> Self {
        Self { config }
    }

    /// Walk the batch once; keep a record the first time it is flagged by any set
    /// (or is ERROR-level under `include_all_error_level`).
    pub fn combine(&self, batch: &Batch, hits: &[HashSet<&LogRecord>]) -> AnomalySet {
        let mut seen: HashSet<&LogRecord> = HashSet::new();
        let mut records = Vec::new();
        for record in batch {
            let flagged = hits.iter().any(|set| set.contains(record))
                || (self.config.include_all_error_level && record.level.is_error());
            if flagged && seen.insert(record) {
                records.push(record.clone());
            }
        }
        tracing::debug!(
            batch = batch.len(),
            detectors = hits.len(),
            anomalies = records.len(),
            "combined detector output"
        );
        AnomalySet { records }
    }
}
