//! Corpus embeddings aligned row-for-row with the corpus.

use std::path::Path;

use tracing::info;

use fable_core::errors::{EmbeddingError, FableError, FableResult, RetrievalError};
use fable_core::traits::TextEmbedder;

use crate::corpus::ImageCorpus;

#[derive(Debug, Clone)]
pub struct CorpusIndex {
    corpus: ImageCorpus,
    embeddings: Vec<Vec<f32>>,
}

impl CorpusIndex {
    /// Pair a corpus with precomputed embeddings.
    pub fn new(corpus: ImageCorpus, embeddings: Vec<Vec<f32>>) -> FableResult<Self> {
        if embeddings.len() != corpus.len() {
            return Err(RetrievalError::MisalignedEmbeddings {
                embeddings: embeddings.len(),
                records: corpus.len(),
            }
            .into());
        }
        if let Some(first) = embeddings.first() {
            let expected = first.len();
            if let Some(bad) = embeddings.iter().find(|e| e.len() != expected) {
                return Err(EmbeddingError::DimensionMismatch {
                    expected,
                    actual: bad.len(),
                }
                .into());
            }
        }
        Ok(Self { corpus, embeddings })
    }

    /// Embed every caption with `embedder`.
    pub fn build(corpus: ImageCorpus, embedder: &dyn TextEmbedder) -> FableResult<Self> {
        let embeddings = embedder.transform(&corpus.descriptions())?;
        info!(
            records = corpus.len(),
            dimensions = embedder.dimensions(),
            embedder = embedder.name(),
            "built corpus index"
        );
        Self::new(corpus, embeddings)
    }

    /// Pair a corpus with a JSON `[[f32]]` embedding matrix, as exported for
    /// a joint text/image space.
    pub fn load_embeddings(corpus: ImageCorpus, path: impl AsRef<Path>) -> FableResult<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(FableError::Io)?;
        let embeddings: Vec<Vec<f32>> = serde_json::from_str(&content)?;
        Self::new(corpus, embeddings)
    }

    pub fn corpus(&self) -> &ImageCorpus {
        &self.corpus
    }

    pub fn embeddings(&self) -> &[Vec<f32>] {
        &self.embeddings
    }

    pub fn image_id(&self, row: usize) -> Option<&str> {
        self.corpus.get(row).map(|r| r.image_id.as_str())
    }

    pub fn len(&self) -> usize {
        self.corpus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.corpus.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fable_core::ImageRecord;

    fn corpus(n: usize) -> ImageCorpus {
        ImageCorpus::from_records(
            (0..n)
                .map(|i| ImageRecord {
                    image_id: format!("img-{i}"),
                    description: format!("caption {i}"),
                })
                .collect(),
        )
        .unwrap()
    }

    #[test]
    fn row_count_must_match() {
        let err = CorpusIndex::new(corpus(3), vec![vec![1.0]; 2]).unwrap_err();
        assert!(matches!(
            err,
            FableError::Retrieval(RetrievalError::MisalignedEmbeddings {
                embeddings: 2,
                records: 3
            })
        ));
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = CorpusIndex::new(corpus(2), vec![vec![1.0, 0.0], vec![1.0]]).unwrap_err();
        assert!(matches!(
            err,
            FableError::Embedding(EmbeddingError::DimensionMismatch { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn row_maps_to_image_id() {
        let index = CorpusIndex::new(corpus(2), vec![vec![1.0], vec![2.0]]).unwrap();
        assert_eq!(index.image_id(1), Some("img-1"));
        assert_eq!(index.image_id(2), None);
    }
}
