//! Severity level to integer code.

use crate::config::SeverityEncoding;
use crate::source::{Batch, Level};
use std::collections::{BTreeSet, HashMap};

const FIXED_CODES: &[(&str, u32)] = &[("INFO", 0), ("WARN", 1), ("ERROR", 2)];

/// Codes fitted to one batch. Never stored beyond the extraction call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeverityCodes {
    codes: HashMap<String, u32>,
}

impl SeverityCodes {
    pub fn fit(batch: &Batch, encoding: SeverityEncoding) -> Self {
        let observed: BTreeSet<&str> = batch.iter().map(|r| r.level.as_str()).collect();
        let codes = match encoding {
            SeverityEncoding::BatchLocal => observed
                .into_iter()
                .enumerate()
                .map(|(i, level)| (level.to_string(), i as u32))
                .collect(),
            SeverityEncoding::Fixed => {
                let mut codes: HashMap<String, u32> = FIXED_CODES
                    .iter()
                    .map(|(level, code)| (level.to_string(), *code))
                    .collect();
                let base = FIXED_CODES.len() as u32;
                let unknown = observed.into_iter().filter(|l| !codes.contains_key(*l));
                let extra: Vec<(String, u32)> = unknown
                    .enumerate()
                    .map(|(i, level)| (level.to_string(), base + i as u32))
                    .collect();
                codes.extend(extra);
                codes
            }
        };
        Self { codes }
    }

    pub fn code(&self, level: &Level) -> Option<u32> {
        self.codes.get(level.as_str()).copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}
