//! The captioned image corpus, read from JSON Lines.

use std::path::Path;

use tracing::info;

use fable_core::errors::{FableError, FableResult, RetrievalError};
use fable_core::ImageRecord;

/// Captioned images in file order. Row `i` of every corpus embedding matrix
/// describes `records()[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageCorpus {
    records: Vec<ImageRecord>,
}

impl ImageCorpus {
    pub fn from_records(records: Vec<ImageRecord>) -> FableResult<Self> {
        if records.is_empty() {
            return Err(RetrievalError::EmptyCorpus.into());
        }
        Ok(Self { records })
    }

    /// Load `{"image_id", "description"}` rows. Blank lines are skipped.
    pub fn load_jsonl(path: impl AsRef<Path>) -> FableResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(FableError::Io)?;
        let corpus = Self::parse_jsonl(&content)?;
        info!(path = %path.display(), records = corpus.len(), "loaded image corpus");
        Ok(corpus)
    }

    pub fn parse_jsonl(content: &str) -> FableResult<Self> {
        let mut records = Vec::new();
        for (i, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: ImageRecord =
                serde_json::from_str(line).map_err(|e| RetrievalError::CorpusLoadFailed {
                    line: i + 1,
                    reason: e.to_string(),
                })?;
            records.push(record);
        }
        Self::from_records(records)
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn get(&self, index: usize) -> Option<&ImageRecord> {
        self.records.get(index)
    }

    /// Captions in row order.
    pub fn descriptions(&self) -> Vec<String> {
        self.records.iter().map(|r| r.description.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
