//! Feature extraction pipeline: batch → severity codes + vocabulary → matrix.
//! Both encoders are fitted to the batch passed in and dropped on return.

use super::{tokenize, FeatureMatrix, SeverityCodes, Vocabulary};
use crate::config::FeaturesConfig;
use crate::source::Batch;
use ndarray::{s, Array2};

pub struct FeatureExtractor {
    config: FeaturesConfig,
}

impl FeatureExtractor {
    pub fn new(config: FeaturesConfig) -> Self {
        Self { config }
    }

    /// One row per record in batch order. An empty batch gives an empty matrix.
    pub fn extract(&self, batch: &Batch) -> FeatureMatrix {
        if batch.is_empty() {
            return FeatureMatrix::empty();
        }

        let severity = SeverityCodes::fit(batch, self.config.severity_encoding);
        let documents: Vec<Vec<String>> = batch.iter().map(|r| tokenize(&r.message)).collect();
        let vocab = Vocabulary::fit(&documents, self.config.max_vocabulary_size);

        let mut values = Array2::zeros((batch.len(), 1 + vocab.len()));
        for (i, (record, doc)) in batch.iter().zip(&documents).enumerate() {
            // Every level in the batch was seen during fit.
            values[[i, 0]] = severity.code(&record.level).unwrap_or(0) as f64;
            vocab.weigh_into(doc, self.config.text_weighting, values.slice_mut(s![i, 1..]));
        }

        tracing::debug!(
            rows = batch.len(),
            levels = severity.len(),
            vocabulary = vocab.len(),
            "extracted features"
        );
        FeatureMatrix::new(values, vocab.terms().to_vec())
    }
}
