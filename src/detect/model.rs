//! Outlier-model detector: features → fit scope → fresh isolation forest → verdicts.

use super::{AnomalyVerdict, Detector, VerdictSource};
use crate::config::{FeaturesConfig, FitScope, ModelConfig};
use crate::error::{Result, TriageError};
use crate::features::{FeatureExtractor, FeatureMatrix};
use crate::model::OutlierModel;
use crate::source::Batch;

pub struct ModelDetector {
    extractor: FeatureExtractor,
    model: OutlierModel,
}

impl ModelDetector {
    pub fn new(features: FeaturesConfig, model: ModelConfig) -> Self {
        Self {
            extractor: FeatureExtractor::new(features),
            model: OutlierModel::new(model),
        }
    }

    pub fn fit_scope(&self) -> FitScope {
        self.model.config().fit_scope
    }

    /// Batch indices the model is fitted on.
    /// `ErrorOnly` trades coverage of other levels for sensitivity among ERROR records.
    fn scoped_rows(&self, batch: &Batch) -> Vec<usize> {
        match self.fit_scope() {
            FitScope::AllRecords => (0..batch.len()).collect(),
            FitScope::ErrorOnly => batch
                .iter()
                .enumerate()
                .filter(|(_, r)| r.level.is_error())
                .map(|(i, _)| i)
                .collect(),
        }
    }

    /// Features fitted to the scoped records alone, so vocabulary and severity codes
    /// reflect the subset the model sees.
    fn scoped_matrix(&self, batch: &Batch, rows: &[usize]) -> FeatureMatrix {
        if rows.len() == batch.len() {
            return self.extractor.extract(batch);
        }
        let records = batch.records();
        let subset: Batch = rows.iter().map(|&i| records[i].clone()).collect();
        self.extractor.extract(&subset)
    }
}

impl Detector for ModelDetector {
    fn source(&self) -> VerdictSource {
        VerdictSource::Model
    }

    /// Only scoped rows are featurized, fitted and labelled.
    fn score<'a>(&self, batch: &'a Batch) -> Result<Vec<AnomalyVerdict<'a>>> {
        let rows = self.scoped_rows(batch);
        if rows.is_empty() {
            return Err(TriageError::DegenerateFit {
                scope: self.fit_scope().as_str().to_string(),
            });
        }

        let scoped = self.scoped_matrix(batch, &rows);
        let labels = self.model.fit_and_score(&scoped)?;

        let records = batch.records();
        Ok(rows
            .into_iter()
            .zip(labels)
            .map(|(i, is_anomalous)| AnomalyVerdict {
                record: &records[i],
                is_anomalous,
                source: VerdictSource::Model,
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::LogRecord;

    #[test]
    fn error_only_without_errors_is_degenerate() {
        let model = ModelConfig {
            fit_scope: FitScope::ErrorOnly,
            ..ModelConfig::default()
        };
        let detector = ModelDetector::new(FeaturesConfig::default(), model);
        let batch = Batch::new(vec![LogRecord::new("t1", "INFO", "ok")]);
        assert!(matches!(
            detector.score(&batch),
            Err(TriageError::DegenerateFit { .. })
        ));
    }

    #[test]
    fn error_only_labels_only_error_rows() {
        let model = ModelConfig {
            fit_scope: FitScope::ErrorOnly,
            ..ModelConfig::default()
        };
        let detector = ModelDetector::new(FeaturesConfig::default(), model);
        let batch = Batch::new(vec![
            LogRecord::new("t1", "INFO", "ok"),
            LogRecord::new("t2", "ERROR", "disk full"),
            LogRecord::new("t3", "ERROR", "disk gone"),
        ]);
        let verdicts = detector.score(&batch).unwrap();
        assert_eq!(verdicts.len(), 2);
        assert!(verdicts.iter().all(|v| v.record.level.is_error()));
        assert_eq!(verdicts[0].record.timestamp, "t2");
    }

    #[test]
    fn error_only_vocabulary_ignores_other_levels() {
        let features = FeaturesConfig {
            max_vocabulary_size: 2,
            ..FeaturesConfig::default()
        };
        let model = ModelConfig {
            fit_scope: FitScope::ErrorOnly,
            ..ModelConfig::default()
        };
        let detector = ModelDetector::new(features, model);
        let mut records: Vec<LogRecord> = (0..20)
            .map(|i| LogRecord::new(format!("t{i}"), "INFO", "heartbeat heartbeat ok ok"))
            .collect();
        records.push(LogRecord::new("e1", "ERROR", "disk full"));
        records.push(LogRecord::new("e2", "ERROR", "disk gone"));
        let batch = Batch::new(records);

        let rows = detector.scoped_rows(&batch);
        assert_eq!(rows, vec![20, 21]);
        let matrix = detector.scoped_matrix(&batch, &rows);
        assert_eq!(matrix.n_rows(), 2);
        assert_eq!(matrix.terms(), &["disk".to_string(), "full".to_string()]);
    }
}
