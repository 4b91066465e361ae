//! Storage of frequency tables under opaque identifiers

use crate::io::error::{Result, persistence_error};
use crate::text::frequency::FrequencyEntry;
use serde::Serialize;
use std::sync::Mutex;

/// Identifier handed out by a repository
pub type WordCloudId = u64;

/// A stored frequency table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredWordCloud {
    /// Identifier returned by [`WordCloudRepository::store`]
    pub id: WordCloudId,
    /// Name given at store time
    pub name: String,
    /// Entries ordered by percentage descending
    pub words: Vec<FrequencyEntry>,
}

/// Listing entry without the word data
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WordCloudSummary {
    /// Identifier
    pub id: WordCloudId,
    /// Name given at store time
    pub name: String,
    /// Number of stored words
    pub word_count: usize,
}

/// Persistence collaborator
///
/// Failures are reported as [`crate::CloudError::Persistence`]; the render
/// pipeline logs them and carries on without an identifier.
pub trait WordCloudRepository: Send + Sync {
    /// Store a table and return its identifier
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be stored
    fn store(&self, name: &str, words: &[FrequencyEntry]) -> Result<WordCloudId>;

    /// Read a stored table back
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read
    fn fetch(&self, id: WordCloudId) -> Result<Option<StoredWordCloud>>;

    /// All stored tables, most recent first
    ///
    /// # Errors
    ///
    /// Returns an error if the storage cannot be read
    fn list(&self) -> Result<Vec<WordCloudSummary>>;
}

/// Process-local repository
#[derive(Debug, Default)]
pub struct InMemoryRepository {
    records: Mutex<Vec<StoredWordCloud>>,
}

impl InMemoryRepository {
    /// Empty repository
    pub fn new() -> Self {
        Self::default()
    }
}

impl WordCloudRepository for InMemoryRepository {
    fn store(&self, name: &str, words: &[FrequencyEntry]) -> Result<WordCloudId> {
        let mut records = self
            .records
            .lock()
            .map_err(|e| persistence_error("store", &e))?;

        let id = records.last().map_or(1, |record| record.id + 1);
        let mut words = words.to_vec();
        words.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
        records.push(StoredWordCloud {
            id,
            name: name.to_owned(),
            words,
        });
        Ok(id)
    }

    fn fetch(&self, id: WordCloudId) -> Result<Option<StoredWordCloud>> {
        let records = self
            .records
            .lock()
            .map_err(|e| persistence_error("fetch", &e))?;
        Ok(records.iter().find(|record| record.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<WordCloudSummary>> {
        let records = self
            .records
            .lock()
            .map_err(|e| persistence_error("list", &e))?;
        Ok(records
            .iter()
            .rev()
            .map(|record| WordCloudSummary {
                id: record.id,
                name: record.name.clone(),
                word_count: record.words.len(),
            })
            .collect())
    }
}
