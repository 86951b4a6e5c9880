use crate::errors::FableResult;
use crate::models::{PromptBatch, SamplingParams};

/// Causal language model used for sampling and divergence scoring.
pub trait LanguageModel: Send + Sync {
    /// Sample `batch.len() * params.num_return_sequences` sequences.
    ///
    /// Each returned sequence starts with its (padded) prompt row, so the
    /// first `batch.width()` ids are the input. Sequences for prompt `i`
    /// occupy rows `i * n .. (i + 1) * n`.
    fn generate(&self, batch: &PromptBatch, params: &SamplingParams) -> FableResult<Vec<Vec<u32>>>;

    /// Next-token logits for every position of `input_ids`,
    /// shape `(input_ids.len() × vocab_size)`.
    fn logits(&self, input_ids: &[u32]) -> FableResult<Vec<Vec<f32>>>;

    /// Human-readable model name.
    fn name(&self) -> &str;
}

/// Text ↔ token-id codec shared by the sampled and the preset model.
pub trait Tokenizer: Send + Sync {
    fn encode(&self, text: &str) -> FableResult<Vec<u32>>;

    /// Decode ids. With `skip_special_tokens`, padding and other special
    /// tokens are dropped from the output.
    fn decode(&self, ids: &[u32], skip_special_tokens: bool) -> FableResult<String>;

    /// Id used for left padding (GPT-2 reuses end-of-text).
    fn pad_token_id(&self) -> u32;
}
