/// Image retrieval errors.
#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("image corpus is empty")]
    EmptyCorpus,

    #[error("corpus load failed at line {line}: {reason}")]
    CorpusLoadFailed { line: usize, reason: String },

    #[error("embedding matrix has {embeddings} rows but corpus has {records} records")]
    MisalignedEmbeddings { embeddings: usize, records: usize },

    #[error("image not found: {image_id}")]
    ImageNotFound { image_id: String },

    #[error("no corpus image could be loaded ({attempted} failed)")]
    NoLoadableImage { attempted: usize },
}
