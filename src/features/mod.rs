//! Batch-local feature extraction: severity code plus term weights per record.

mod pipeline;
mod severity;
mod text;

pub use pipeline::FeatureExtractor;
pub use severity::SeverityCodes;
pub use text::{tokenize, Vocabulary};

use ndarray::{Array2, ArrayView1};

/// One row per record, `[severity_code, w_1, ..., w_K]`, rows in batch order.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    values: Array2<f64>,
    terms: Vec<String>,
}

impl FeatureMatrix {
    pub fn empty() -> Self {
        Self {
            values: Array2::zeros((0, 0)),
            terms: Vec::new(),
        }
    }

    pub fn new(values: Array2<f64>, terms: Vec<String>) -> Self {
        Self { values, terms }
    }

    pub fn n_rows(&self) -> usize {
        self.values.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.values.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.values.nrows() == 0
    }

    pub fn values(&self) -> &Array2<f64> {
        &self.values
    }

    pub fn row(&self, idx: usize) -> ArrayView1<'_, f64> {
        self.values.row(idx)
    }

    /// Vocabulary terms in column order (columns 1..=K).
    pub fn terms(&self) -> &[String] {
        &self.terms
    }
}
