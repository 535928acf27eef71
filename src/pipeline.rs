//! One triage invocation: validate → detectors → join → combine.

use crate::combine::{AnomalySet, ResultCombiner};
use crate::config::TriageConfig;
use crate::detect::{Detector, ModelDetector, RuleMatcher, VerdictSource};
use crate::error::{Result, TriageError};
use crate::source::{Batch, LogRecord};
use serde::Serialize;
use std::collections::HashSet;
use tracing::{info, info_span, warn};
use uuid::Uuid;

/// Per-detector outcome of one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetectorSummary {
    pub source: VerdictSource,
    /// Flagged record identities; `None` when the detector could not fit
    pub hits: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TriageReport {
    pub run_id: String,
    pub records: usize,
    pub detectors: Vec<DetectorSummary>,
    pub anomalies: AnomalySet,
}

impl TriageReport {
    pub fn anomalies(&self) -> &[LogRecord] {
        self.anomalies.records()
    }

    /// Whether the outlier model produced labels in this run.
    pub fn model_ran(&self) -> bool {
        self.detectors
            .iter()
            .any(|d| d.source == VerdictSource::Model && d.hits.is_some())
    }
}

pub struct TriagePipeline {
    detectors: Vec<Box<dyn Detector>>,
    combiner: ResultCombiner,
    max_batch_size: usize,
}

impl TriagePipeline {
    /// Validates the configuration before anything can be fitted.
    pub fn new(config: TriageConfig) -> Result<Self> {
        config.validate()?;
        let mut detectors: Vec<Box<dyn Detector>> = Vec::new();
        if config.rules.enabled {
            detectors.push(Box::new(RuleMatcher::from_config(&config.rules)?));
        }
        detectors.push(Box::new(ModelDetector::new(config.features, config.model)));
        Ok(Self::with_detectors(
            detectors,
            ResultCombiner::new(config.combiner),
            config.limits.max_batch_size,
        ))
    }

    /// Assemble from already-built detectors, e.g. an extra detector variant.
    pub fn with_detectors(
        detectors: Vec<Box<dyn Detector>>,
        combiner: ResultCombiner,
        max_batch_size: usize,
    ) -> Self {
        Self {
            detectors,
            combiner,
            max_batch_size,
        }
    }

    /// Run on one batch. An empty batch yields an empty report without fitting anything.
    pub fn run(&self, batch: &Batch) -> Result<TriageReport> {
        let run_id = Uuid::new_v4().to_string();
        let span = info_span!("triage", run_id = %run_id, records = batch.len());
        let _guard = span.enter();

        match self.analyze(batch) {
            Ok((detectors, anomalies)) => {
                info!(anomalies = anomalies.len(), "triage complete");
                Ok(TriageReport {
                    run_id,
                    records: batch.len(),
                    detectors,
                    anomalies,
                })
            }
            Err(TriageError::EmptyBatch) => {
                info!("no records to analyze");
                Ok(TriageReport {
                    run_id,
                    ..TriageReport::default()
                })
            }
            Err(e) => Err(e),
        }
    }

    fn analyze(&self, batch: &Batch) -> Result<(Vec<DetectorSummary>, AnomalySet)> {
        if batch.is_empty() {
            return Err(TriageError::EmptyBatch);
        }
        if batch.len() > self.max_batch_size {
            return Err(TriageError::BatchTooLarge {
                size: batch.len(),
                limit: self.max_batch_size,
            });
        }

        // Detectors only read the batch; all of them finish before the combine step.
        let mut summaries = Vec::with_capacity(self.detectors.len());
        let mut hit_sets: Vec<HashSet<&LogRecord>> = Vec::with_capacity(self.detectors.len());
        for detector in &self.detectors {
            let source = detector.source();
            match detector.flagged(batch) {
                Ok(hits) => {
                    info!(detector = source.as_str(), hits = hits.len(), "detector finished");
                    summaries.push(DetectorSummary {
                        source,
                        hits: Some(hits.len()),
                    });
                    hit_sets.push(hits);
                }
                Err(TriageError::DegenerateFit { scope }) => {
                    warn!(detector = source.as_str(), scope = %scope, "nothing to fit; continuing without this detector");
                    summaries.push(DetectorSummary { source, hits: None });
                }
                Err(e) => return Err(e),
            }
        }

        Ok((summaries, self.combiner.combine(batch, &hit_sets)))
    }
}
