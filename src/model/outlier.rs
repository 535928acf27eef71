//! Outlier model: fresh isolation forest per call, labels by expected anomaly fraction.

use super::IsolationForest;
use crate::config::ModelConfig;
use crate::error::{Result, TriageError};
use crate::features::FeatureMatrix;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Scores and labels for one fit.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlierScores {
    pub scores: Vec<f64>,
    pub threshold: f64,
    /// true = anomalous
    pub labels: Vec<bool>,
}

impl OutlierScores {
    pub fn n_anomalies(&self) -> usize {
        self.labels.iter().filter(|l| **l).count()
    }
}

pub struct OutlierModel {
    config: ModelConfig,
}

impl OutlierModel {
    pub fn new(config: ModelConfig) -> Self {
        if config.seed.is_none() {
            tracing::warn!("outlier model has no seed; labels are not reproducible across runs");
        }
        Self { config }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// One label per row, true = anomalous. Rejects an empty matrix.
    pub fn fit_and_score(&self, matrix: &FeatureMatrix) -> Result<Vec<bool>> {
        Ok(self.fit_and_rank(matrix)?.labels)
    }

    /// Train on exactly the rows given and score those same rows. Nothing is kept afterwards.
    pub fn fit_and_rank(&self, matrix: &FeatureMatrix) -> Result<OutlierScores> {
        if matrix.is_empty() {
            return Err(TriageError::DegenerateFit {
                scope: self.config.fit_scope.as_str().to_string(),
            });
        }

        let mut rng = match self.config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let x = matrix.values().view();
        let forest = IsolationForest::fit(x, self.config.n_estimators, self.config.max_samples, &mut rng);
        let scores = forest.score(x);
        let threshold = quantile(&scores, 1.0 - self.config.anomaly_fraction);
        let labels: Vec<bool> = scores.iter().map(|s| *s > threshold).collect();

        let result = OutlierScores {
            scores,
            threshold,
            labels,
        };
        tracing::debug!(
            rows = matrix.n_rows(),
            trees = forest.n_trees(),
            threshold,
            anomalies = result.n_anomalies(),
            "outlier model fitted"
        );
        Ok(result)
    }
}

/// Linear-interpolated quantile, `q` in [0, 1]. `values` must be non-empty.
fn quantile(values: &[f64], q: f64) -> f64 {
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    sorted[lo] + (sorted[hi] - sorted[lo]) * (pos - lo as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array2;

    fn matrix(rows: Vec<[f64; 2]>) -> FeatureMatrix {
        let n = rows.len();
        let flat: Vec<f64> = rows.into_iter().flatten().collect();
        FeatureMatrix::new(Array2::from_shape_vec((n, 2), flat).unwrap(), vec!["a".into()])
    }

    #[test]
    fn quantile_interpolates() {
        assert_eq!(quantile(&[1.0, 2.0, 3.0, 4.0, 5.0], 0.5), 3.0);
        assert_eq!(quantile(&[0.0, 10.0], 0.25), 2.5);
        assert_eq!(quantile(&[7.0], 0.8), 7.0);
    }

    #[test]
    fn empty_matrix_is_degenerate() {
        let model = OutlierModel::new(ModelConfig::default());
        let err = model.fit_and_score(&FeatureMatrix::empty()).unwrap_err();
        assert!(matches!(err, TriageError::DegenerateFit { .. }));
    }

    #[test]
    fn fraction_bounds_label_count() {
        let rows: Vec<[f64; 2]> = (0..50).map(|i| [(i % 7) as f64, (i * 13 % 11) as f64]).collect();
        let config = ModelConfig {
            anomaly_fraction: 0.1,
            ..ModelConfig::default()
        };
        let out = OutlierModel::new(config).fit_and_rank(&matrix(rows)).unwrap();
        assert_eq!(out.labels.len(), 50);
        assert!(out.n_anomalies() <= 5);
    }

    #[test]
    fn zero_variance_matrix_is_all_inlier() {
        let config = ModelConfig {
            anomaly_fraction: 0.5,
            ..ModelConfig::default()
        };
        let labels = OutlierModel::new(config).fit_and_score(&matrix(vec![[0.0, 1.0]; 10])).unwrap();
        assert_eq!(labels, vec![false; 10]);
    }

    #[test]
    fn same_seed_same_labels() {
        let rows: Vec<[f64; 2]> = (0..30).map(|i| [(i % 4) as f64, (i * 7 % 9) as f64]).collect();
        let m = matrix(rows);
        let a = OutlierModel::new(ModelConfig::default()).fit_and_rank(&m).unwrap();
        let b = OutlierModel::new(ModelConfig::default()).fit_and_rank(&m).unwrap();
        assert_eq!(a, b);
    }
}
