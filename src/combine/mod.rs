//! Merges detector outputs into the final anomaly set.

mod merge;

pub use merge::{AnomalySet, ResultCombiner};
