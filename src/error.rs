//! Error taxonomy for a single triage invocation.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum TriageError {
    /// Nothing to analyze; the pipeline turns this into an empty report.
    #[error("no records to analyze")]
    EmptyBatch,

    /// The model's fit scope selected no rows.
    #[error("outlier model has no rows to fit (fit scope: {scope})")]
    DegenerateFit { scope: String },

    #[error("configuration error: {0}")]
    Config(String),

    #[error("batch of {size} records exceeds the limit of {limit}")]
    BatchTooLarge { size: usize, limit: usize },

    #[error("invalid record on line {line}: {source}")]
    Record {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("regex compilation error: {0}")]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, TriageError>;
