//! log-triage entrypoint: reads a JSON-lines batch (or generates a sample), runs the
//! triage pipeline once, and prints the anomalies.
//!
//! Usage: `log-triage [INPUT.jsonl]`; configuration from `TRIAGE_CONFIG_PATH` (default `triage.json`).

use log_triage::{
    config::{OutputFormat, TriageConfig},
    logging::StructuredLogger,
    pipeline::{TriagePipeline, TriageReport},
    sink::{JsonLinesSink, PresentationSink, TextSink},
    source::{JsonLinesSource, RecordSource, SyntheticSource},
};
use std::path::{Path, PathBuf};
use tracing::info;

/// One invocation. The pipeline is built (and the configuration validated) before anything is printed.
fn run_once(
    config: TriageConfig,
    input: Option<&Path>,
    sink: &mut dyn PresentationSink,
) -> log_triage::Result<TriageReport> {
    let output_format = config.output.format;
    let sample_size = config.output.sample_size;
    let pipeline = TriagePipeline::new(config)?;

    let batch = match input {
        Some(path) => {
            info!(input = %path.display(), "reading records");
            JsonLinesSource::open(path)?.read_batch()?
        }
        None => {
            let batch = SyntheticSource::new(sample_size, None).read_batch()?;
            if output_format == OutputFormat::Text {
                sink.present("Generated logs", batch.records())?;
            }
            batch
        }
    };

    let report = pipeline.run(&batch)?;
    if report.anomalies().is_empty() {
        sink.present_none()?;
    } else {
        sink.present("Detected errors/anomalies", report.anomalies())?;
    }
    Ok(report)
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config_path = std::env::var("TRIAGE_CONFIG_PATH")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("triage.json"));
    let config = TriageConfig::load(&config_path)?;

    StructuredLogger::init(config.log.json, &config.log.level);
    info!(config = %config_path.display(), "log triage starting");

    let mut sink: Box<dyn PresentationSink> = match config.output.format {
        OutputFormat::Text => Box::new(TextSink::stdout()),
        OutputFormat::Json => Box::new(JsonLinesSink::stdout()),
    };
    let input = std::env::args_os().nth(1).map(PathBuf::from);

    let report = run_once(config, input.as_deref(), sink.as_mut())?;
    info!(
        run_id = %report.run_id,
        records = report.records,
        anomalies = report.anomalies.len(),
        model_ran = report.model_ran(),
        detectors = ?report.detectors,
        "log triage complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use log_triage::TriageError;

    #[test]
    fn invalid_config_prints_nothing() {
        let mut config = TriageConfig::default();
        config.model.anomaly_fraction = 0.0;
        let mut sink = TextSink::new(Vec::new());
        let err = run_once(config, None, &mut sink).unwrap_err();
        assert!(matches!(err, TriageError::Config(_)));
        assert!(sink.into_inner().is_empty());
    }

    #[test]
    fn empty_sample_reports_no_anomalies_once() {
        let mut config = TriageConfig::default();
        config.output.sample_size = 0;
        let mut sink = TextSink::new(Vec::new());
        run_once(config, None, &mut sink).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "\nGenerated logs:\n\nNo anomalies found.\n");
    }

    #[test]
    fn sample_is_shown_before_results() {
        let mut config = TriageConfig::default();
        config.output.sample_size = 20;
        let mut sink = TextSink::new(Vec::new());
        run_once(config, None, &mut sink).unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert!(out.starts_with("\nGenerated logs:\n"));
    }
}
