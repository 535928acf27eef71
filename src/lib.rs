//! Log triage — narrows a batch of log records to the few worth a human look.
//!
//! Modular structure:
//! - [`source`] — Log records, batches, and record producers
//! - [`features`] — Batch-local severity and term-weight feature extraction
//! - [`model`] — Isolation-forest outlier model, retrained per batch
//! - [`detect`] — Rule matcher and model detector behind one trait
//! - [`combine`] — Union, dedup, and ordering of detector output
//! - [`pipeline`] — One end-to-end invocation
//! - [`sink`] — Text / JSON-lines presentation
//! - [`logging`] — Diagnostic tracing setup

pub mod config;
pub mod error;
pub mod source;
pub mod features;
pub mod model;
pub mod detect;
pub mod combine;
pub mod pipeline;
pub mod sink;
pub mod logging;

pub use config::TriageConfig;
pub use error::{Result, TriageError};
pub use source::{Batch, Level, LogRecord, RecordSource};
pub use features::{FeatureExtractor, FeatureMatrix};
pub use model::OutlierModel;
pub use detect::{AnomalyVerdict, Detector, ModelDetector, RuleMatcher, VerdictSource};
pub use combine::{AnomalySet, ResultCombiner};
pub use pipeline::{TriagePipeline, TriageReport};
pub use sink::PresentationSink;
pub use logging::StructuredLogger;
