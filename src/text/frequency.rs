//! Word frequency ranking with a deterministic total order

use crate::io::configuration::RANKED_TABLE_CAP;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::HashMap;

/// One row of the frequency table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    /// Normalized word
    pub word: String,
    /// Number of occurrences, at least 1
    pub frequency: usize,
    /// Share of all counted tokens in percent, rounded to 2 decimals
    pub percentage: f64,
}

/// Ranked word counts for one input
///
/// Entries are ordered by frequency descending, then word ascending. The
/// full table is kept for export; [`FrequencyTable::ranked`] exposes the
/// capped view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyTable {
    entries: Vec<FrequencyEntry>,
    total: usize,
}

impl FrequencyTable {
    /// All entries in rank order
    pub fn entries(&self) -> &[FrequencyEntry] {
        &self.entries
    }

    /// At most [`RANKED_TABLE_CAP`] leading entries
    pub fn ranked(&self) -> &[FrequencyEntry] {
        self.top(RANKED_TABLE_CAP)
    }

    /// At most `n` leading entries
    pub fn top(&self, n: usize) -> &[FrequencyEntry] {
        self.entries.get(..n).unwrap_or(&self.entries)
    }

    /// Number of counted token occurrences
    pub const fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct words
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no token was counted
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Round a percentage to two decimals
pub fn round_percentage(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Count tokens case-sensitively and order them
pub fn rank<S: AsRef<str>>(tokens: &[S]) -> FrequencyTable {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_ref()).or_insert(0) += 1;
    }

    let total = tokens.len();
    let mut entries: Vec<FrequencyEntry> = counts
        .into_iter()
        .map(|(word, frequency)| FrequencyEntry {
            word: word.to_owned(),
            frequency,
            percentage: round_percentage(100.0 * frequency as f64 / total as f64),
        })
        .collect();

    entries.sort_by(compare_entries);

    FrequencyTable { entries, total }
}

fn compare_entries(a: &FrequencyEntry, b: &FrequencyEntry) -> Ordering {
    b.frequency
        .cmp(&a.frequency)
        .then_with(|| a.word.cmp(&b.word))
}
