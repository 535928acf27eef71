//! Unsupervised outlier detection, retrained from scratch on every batch.

mod isolation;
mod outlier;

pub use isolation::{average_path_length, IsolationForest, IsolationTree};
pub use outlier::{OutlierModel, OutlierScores};
