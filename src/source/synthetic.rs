//! Random sample producer for demos and benches: INFO / WARN / ERROR lines from fixed message pools.

use super::{Batch, Level, LogRecord, RecordSource, TIMESTAMP_FORMAT};
use crate::error::Result;
use chrono::Local;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

const INFO_MESSAGES: &[&str] = &["Connection established.", "Payment approved."];
const WARN_MESSAGES: &[&str] = &["Login attempt failed.", "Server responding slowly."];
const ERROR_MESSAGES: &[&str] = &[
    "Critical failure: database server offline.",
    "Internal error: unhandled exception.",
    "Timeout on payment API.",
    "Division by zero detected.",
];

pub struct SyntheticSource {
    count: usize,
    rng: StdRng,
}

impl SyntheticSource {
    /// `seed: None` draws from OS entropy.
    pub fn new(count: usize, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self { count, rng }
    }

    fn next_record(&mut self) -> LogRecord {
        let levels = [Level::Info, Level::Warn, Level::Error];
        let level = levels.choose(&mut self.rng).cloned().unwrap_or(Level::Info);
        let pool = match level {
            Level::Warn => WARN_MESSAGES,
            Level::Error => ERROR_MESSAGES,
            _ => INFO_MESSAGES,
        };
        let message = pool.choose(&mut self.rng).copied().unwrap_or_default();
        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        LogRecord::new(timestamp, level, message)
    }
}

impl RecordSource for SyntheticSource {
    fn read_batch(&mut self) -> Result<Batch> {
        let batch: Batch = (0..self.count).map(|_| self.next_record()).collect();
        tracing::debug!(count = batch.len(), "generated synthetic batch");
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_count_with_pooled_messages() {
        let batch = SyntheticSource::new(30, Some(7)).read_batch().unwrap();
        assert_eq!(batch.len(), 30);
        for r in &batch {
            let pool = match r.level {
                Level::Info => INFO_MESSAGES,
                Level::Warn => WARN_MESSAGES,
                Level::Error => ERROR_MESSAGES,
                Level::Other(_) => panic!("unexpected level"),
            };
            assert!(pool.contains(&r.message.as_str()));
            assert_eq!(r.timestamp.len(), "2024-01-01 00:00:00,000".len());
        }
    }

    #[test]
    fn seeded_levels_and_messages_repeat() {
        let a = SyntheticSource::new(20, Some(1)).read_batch().unwrap();
        let b = SyntheticSource::new(20, Some(1)).read_batch().unwrap();
        let strip = |batch: &Batch| {
            batch
                .iter()
                .map(|r| (r.level.clone(), r.message.clone()))
                .collect::<Vec<_>>()
        };
        assert_eq!(strip(&a), strip(&b));
    }
}
