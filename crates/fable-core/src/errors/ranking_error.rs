/// Scoring and ranking errors.
#[derive(Debug, thiserror::Error)]
pub enum RankingError {
    #[error("ragged score matrix: row {row} has {actual} features, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("non-finite score for feature {feature} in row {row}")]
    NonFiniteScore { row: usize, feature: usize },

    #[error("model logits disagree: preset has {preset} positions, fine-tuned has {finetuned}")]
    LogitShapeMismatch { preset: usize, finetuned: usize },

    #[error("lexicon load failed: {reason}")]
    LexiconLoadFailed { reason: String },
}
