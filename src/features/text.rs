//! Message tokenization, vocabulary fitting and term weighting.

use crate::config::TextWeighting;
use ndarray::{Array2, ArrayViewMut1};
use regex::Regex;
use std::collections::{BTreeMap, HashMap};
use std::sync::OnceLock;

static TOKEN_RE: OnceLock<Regex> = OnceLock::new();

fn token_re() -> &'static Regex {
    // Literal pattern; cannot fail to compile.
    TOKEN_RE.get_or_init(|| Regex::new(r"\b\w\w+\b").expect("token pattern"))
}

/// Lowercased word tokens of two or more word characters, in message order.
pub fn tokenize(message: &str) -> Vec<String> {
    let lower = message.to_lowercase();
    token_re()
        .find_iter(&lower)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Terms kept for one batch, mapped to their column offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Vocabulary {
    index: HashMap<String, usize>,
    terms: Vec<String>,
    /// Smoothed idf per column, aligned with `terms`
    idf: Vec<f64>,
}

impl Vocabulary {
    /// Keep the `max_size` most frequent terms by total count (ties: lexicographic).
    /// Columns are ordered lexicographically.
    pub fn fit(documents: &[Vec<String>], max_size: usize) -> Self {
        let mut total: BTreeMap<&str, usize> = BTreeMap::new();
        let mut doc_freq: HashMap<&str, usize> = HashMap::new();
        for doc in documents {
            let mut seen: Vec<&str> = Vec::new();
            for tok in doc {
                *total.entry(tok.as_str()).or_insert(0) += 1;
                if !seen.contains(&tok.as_str()) {
                    seen.push(tok.as_str());
                }
            }
            for tok in seen {
                *doc_freq.entry(tok).or_insert(0) += 1;
            }
        }

        let mut ranked: Vec<(&str, usize)> = total.into_iter().collect();
        // BTreeMap order is lexicographic; stable sort keeps it for equal counts.
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(max_size);
        let mut terms: Vec<String> = ranked.into_iter().map(|(t, _)| t.to_string()).collect();
        terms.sort();

        let n_docs = documents.len() as f64;
        let idf = terms
            .iter()
            .map(|t| {
                let df = doc_freq.get(t.as_str()).copied().unwrap_or(0) as f64;
                ((1.0 + n_docs) / (1.0 + df)).ln() + 1.0
            })
            .collect();
        let index = terms.iter().enumerate().map(|(i, t)| (t.clone(), i)).collect();
        Self { index, terms, idf }
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[String] {
        &self.terms
    }

    pub fn column(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    /// Write the weights of one tokenized message into `out` (length = vocabulary size).
    pub fn weigh_into(&self, tokens: &[String], weighting: TextWeighting, mut out: ArrayViewMut1<'_, f64>) {
        out.fill(0.0);
        for tok in tokens {
            if let Some(col) = self.column(tok) {
                out[col] += 1.0;
            }
        }
        if weighting == TextWeighting::Tfidf {
            for (col, w) in out.iter_mut().enumerate() {
                *w *= self.idf[col];
            }
            let norm = out.iter().map(|w| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                out.mapv_inplace(|w| w / norm);
            }
        }
    }

    /// Weight matrix of shape `(documents, len)`.
    pub fn weigh_all(&self, documents: &[Vec<String>], weighting: TextWeighting) -> Array2<f64> {
        let mut out = Array2::zeros((documents.len(), self.len()));
        for (doc, row) in documents.iter().zip(out.rows_mut()) {
            self.weigh_into(doc, weighting, row);
        }
        out
    }
}
