/// Text generation errors.
#[derive(Debug, thiserror::Error)]
pub enum GenerationError {
    #[error("no prompts given for generation")]
    EmptyPrompts,

    #[error("invalid sampling parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("model returned {actual} sequences, expected {expected}")]
    UnexpectedBatchSize { expected: usize, actual: usize },

    #[error("tokenizer failed: {reason}")]
    TokenizerFailed { reason: String },

    #[error("generation produced no usable candidates")]
    NoCandidates,
}
