mod embedding_error;
mod generation_error;
mod imaging_error;
mod ranking_error;
mod retrieval_error;
mod session_error;

pub use embedding_error::EmbeddingError;
pub use generation_error::GenerationError;
pub use imaging_error::ImagingError;
pub use ranking_error::RankingError;
pub use retrieval_error::RetrievalError;
pub use session_error::SessionError;

/// Top-level error for every Fable subsystem.
#[derive(Debug, thiserror::Error)]
pub enum FableError {
    #[error(transparent)]
    Generation(#[from] GenerationError),

    #[error(transparent)]
    Ranking(#[from] RankingError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Retrieval(#[from] RetrievalError),

    #[error(transparent)]
    Imaging(#[from] ImagingError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("config error: {0}")]
    ConfigError(String),

    #[error("model error: {model}: {reason}")]
    ModelError { model: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type FableResult<T> = Result<T, FableError>;
