//! Failure-vocabulary detector: whole-word, case-insensitive term match on the message.
//! A term matches when neither neighbour is a word character, so punctuated terms
//! (`c++`, `.net`) behave like plain words.

use super::{AnomalyVerdict, Detector, VerdictSource};
use crate::config::RulesConfig;
use crate::error::{Result, TriageError};
use crate::source::{Batch, LogRecord};
use regex::Regex;
use std::collections::HashSet;

pub struct RuleMatcher {
    pattern: Regex,
}

impl RuleMatcher {
    pub fn new(terms: &[String]) -> Result<Self> {
        if terms.is_empty() || terms.iter().any(|t| t.trim().is_empty()) {
            return Err(TriageError::Config("rule terms must be non-empty".into()));
        }
        let alternatives: Vec<String> = terms.iter().map(|t| regex::escape(t.trim())).collect();
        let pattern = Regex::new(&format!(
            r"(?i)(?:^|[^\w])(?:{})(?:[^\w]|$)",
            alternatives.join("|")
        ))?;
        Ok(Self { pattern })
    }

    pub fn from_config(config: &RulesConfig) -> Result<Self> {
        Self::new(&config.terms)
    }

    pub fn is_match(&self, record: &LogRecord) -> bool {
        self.pattern.is_match(&record.message)
    }

    /// Every record whose message contains a configured term.
    pub fn matches<'a>(&self, batch: &'a Batch) -> HashSet<&'a LogRecord> {
        batch.iter().filter(|r| self.is_match(r)).collect()
    }
}

impl Detector for RuleMatcher {
    fn source(&self) -> VerdictSource {
        VerdictSource::Rule
    }

    fn score<'a>(&self, batch: &'a Batch) -> Result<Vec<AnomalyVerdict<'a>>> {
        Ok(batch
            .iter()
            .map(|record| AnomalyVerdict {
                record,
                is_anomalous: self.is_match(record),
                source: VerdictSource::Rule,
            })
            .collect())
    }
}
