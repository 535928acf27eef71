//! Triage configuration. Every field is optional in the JSON file and falls back to defaults.

use crate::error::{Result, TriageError};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Feature extraction parameters
    pub features: FeaturesConfig,
    /// Outlier model parameters
    pub model: ModelConfig,
    /// Failure-vocabulary detector
    pub rules: RulesConfig,
    /// Merge policy
    pub combiner: CombinerConfig,
    /// Upper bound on records per invocation
    pub limits: LimitsConfig,
    /// Output format for the presentation sink
    pub output: OutputConfig,
    /// Logging
    pub log: LogConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TextWeighting {
    /// Raw term count per message
    Frequency,
    /// Term count times smoothed inverse document frequency, rows L2-normalized
    Tfidf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeverityEncoding {
    /// Codes assigned to the levels observed in the batch, lexicographic order
    BatchLocal,
    /// INFO=0, WARN=1, ERROR=2; unknown levels numbered from 3
    Fixed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitScope {
    /// Fit and label every record in the batch
    AllRecords,
    /// Fit and label ERROR records only; anomalies at other levels are ignored
    ErrorOnly,
}

impl FitScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            FitScope::AllRecords => "all_records",
            FitScope::ErrorOnly => "error_only",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    /// Cap on vocabulary size (number of text columns)
    pub max_vocabulary_size: usize,
    pub text_weighting: TextWeighting,
    pub severity_encoding: SeverityEncoding,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Expected share of anomalous rows, exclusive range (0, 1)
    pub anomaly_fraction: f64,
    /// Seed for tree construction; `None` seeds from OS entropy and runs are not reproducible
    pub seed: Option<u64>,
    /// Number of isolation trees
    pub n_estimators: usize,
    /// Subsample size per tree (capped at the row count)
    pub max_samples: usize,
    pub fit_scope: FitScope,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub enabled: bool,
    /// Failure terms matched as whole words, case-insensitive
    pub terms: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombinerConfig {
    /// Emit every ERROR record regardless of detector verdicts
    pub include_all_error_level: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub max_batch_size: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Records generated when no input file is given
    pub sample_size: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: String,
    pub json: bool,
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            max_vocabulary_size: 50,
            text_weighting: TextWeighting::Tfidf,
            severity_encoding: SeverityEncoding::BatchLocal,
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            anomaly_fraction: 0.2,
            seed: Some(42),
            n_estimators: 200,
            max_samples: 256,
            fit_scope: FitScope::AllRecords,
        }
    }
}

pub const DEFAULT_RULE_TERMS: &[&str] = &[
    "error",
    "failure",
    "failed",
    "timeout",
    "duplicate",
    "invalid",
    "discrepancy",
];

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            terms: DEFAULT_RULE_TERMS.iter().map(|t| t.to_string()).collect(),
        }
    }
}

impl Default for CombinerConfig {
    fn default() -> Self {
        Self {
            include_all_error_level: true,
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 10_000,
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            sample_size: 50,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl TriageConfig {
    /// Load from a JSON file. A missing file yields defaults; a malformed one is an error.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }

    /// Reject invalid settings before any model is fitted. Nothing is clamped.
    pub fn validate(&self) -> Result<()> {
        let fraction = self.model.anomaly_fraction;
        if !(fraction > 0.0 && fraction < 1.0) {
            return Err(TriageError::Config(format!(
                "anomaly_fraction must be in (0, 1), got {fraction}"
            )));
        }
        if self.model.n_estimators == 0 {
            return Err(TriageError::Config("n_estimators must be at least 1".into()));
        }
        if self.model.max_samples == 0 {
            return Err(TriageError::Config("max_samples must be at least 1".into()));
        }
        if self.features.max_vocabulary_size == 0 {
            return Err(TriageError::Config(
                "max_vocabulary_size must be at least 1".into(),
            ));
        }
        if self.limits.max_batch_size == 0 {
            return Err(TriageError::Config("max_batch_size must be at least 1".into()));
        }
        if self.rules.enabled {
            if self.rules.terms.is_empty() {
                return Err(TriageError::Config(
                    "rule matching is enabled but no rule terms are configured".into(),
                ));
            }
            if self.rules.terms.iter().any(|t| t.trim().is_empty()) {
                return Err(TriageError::Config("rule terms must not be blank".into()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = TriageConfig::default();
        assert!(c.validate().is_ok());
        assert_eq!(c.features.max_vocabulary_size, 50);
        assert_eq!(c.model.seed, Some(42));
    }

    #[test]
    fn fraction_bounds_are_exclusive() {
        for bad in [0.0, 1.0, -0.1, 1.5, f64::NAN] {
            let mut c = TriageConfig::default();
            c.model.anomaly_fraction = bad;
            assert!(matches!(c.validate(), Err(TriageError::Config(_))), "{bad}");
        }
    }

    #[test]
    fn zero_sizes_rejected() {
        let cases: [(&str, fn(&mut TriageConfig)); 4] = [
            ("n_estimators", |c| c.model.n_estimators = 0),
            ("max_samples", |c| c.model.max_samples = 0),
            ("max_vocabulary_size", |c| c.features.max_vocabulary_size = 0),
            ("max_batch_size", |c| c.limits.max_batch_size = 0),
        ];
        for (field, zero) in cases {
            let mut c = TriageConfig::default();
            zero(&mut c);
            match c.validate() {
                Err(TriageError::Config(msg)) => assert!(msg.contains(field), "{field}: {msg}"),
                other => panic!("{field}: expected config error, got {other:?}"),
            }
        }
    }

    #[test]
    fn empty_terms_only_rejected_when_rules_enabled() {
        let mut c = TriageConfig::default();
        c.rules.terms.clear();
        assert!(matches!(c.validate(), Err(TriageError::Config(_))));
        c.rules.enabled = false;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let c: TriageConfig = serde_json::from_str(
            r#"{"model": {"fit_scope": "error_only", "seed": null}, "features": {"text_weighting": "frequency"}}"#,
        )
        .unwrap();
        assert_eq!(c.model.fit_scope, FitScope::ErrorOnly);
        assert_eq!(c.model.seed, None);
        assert_eq!(c.model.n_estimators, 200);
        assert_eq!(c.features.text_weighting, TextWeighting::Frequency);
        assert!(c.combiner.include_all_error_level);
    }
}
