/// Embedding subsystem errors.
#[derive(Debug, thiserror::Error)]
pub enum EmbeddingError {
    #[error("cannot fit embedder on an empty corpus")]
    EmptyCorpus,

    #[error("vocabulary is empty after stop-word filtering")]
    EmptyVocabulary,

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },
}
