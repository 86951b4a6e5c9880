//! One batched sampling pass.

use std::sync::Arc;

use tracing::debug;

use fable_core::config::GenerationConfig;
use fable_core::constants::{END_OF_SENTENCE_MARKS, MAX_DEGENERATE_CHARS, REPLACEMENT_CHAR};
use fable_core::errors::{FableResult, GenerationError};
use fable_core::models::{PromptBatch, SamplingParams};
use fable_core::traits::{LanguageModel, Tokenizer};

/// What a sampled string contains.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleMode {
    /// Prompt followed by its continuation. `max_length` counts the prompt.
    Full,
    /// Only the newly generated continuation, `max_length` new tokens.
    /// Degenerate results are dropped.
    Continuation,
}

/// Drives a language model to produce sentence-trimmed candidates.
pub struct SequenceSampler {
    model: Arc<dyn LanguageModel>,
    tokenizer: Arc<dyn Tokenizer>,
    config: GenerationConfig,
    end_of_sentence_ids: Vec<u32>,
}

impl SequenceSampler {
    pub fn new(
        model: Arc<dyn LanguageModel>,
        tokenizer: Arc<dyn Tokenizer>,
        config: GenerationConfig,
    ) -> FableResult<Self> {
        let mut end_of_sentence_ids = Vec::new();
        for mark in END_OF_SENTENCE_MARKS {
            // Marks that need several tokens cannot be matched token-wise.
            if let [id] = tokenizer.encode(mark)?.as_slice() {
                end_of_sentence_ids.push(*id);
            }
        }
        Ok(Self {
            model,
            tokenizer,
            config,
            end_of_sentence_ids,
        })
    }

    pub fn model(&self) -> &Arc<dyn LanguageModel> {
        &self.model
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Sample `num_return_sequences` candidates for every prompt.
    ///
    /// Results are grouped by prompt, in prompt order. In
    /// [`SampleMode::Continuation`] fewer results may come back when some
    /// generations are degenerate.
    pub fn sample(
        &self,
        prompts: &[String],
        max_length: usize,
        num_return_sequences: usize,
        mode: SampleMode,
    ) -> FableResult<Vec<String>> {
        if prompts.is_empty() {
            return Err(GenerationError::EmptyPrompts.into());
        }
        if max_length == 0 {
            return Err(GenerationError::InvalidParameter {
                name: "max_length",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if num_return_sequences == 0 {
            return Err(GenerationError::InvalidParameter {
                name: "num_return_sequences",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }

        let span = fable_core::generation_span!(prompts.len(), max_length);
        let _guard = span.enter();

        let encoded = prompts
            .iter()
            .map(|p| self.tokenizer.encode(p))
            .collect::<FableResult<Vec<_>>>()?;
        let batch = PromptBatch::left_padded(encoded, self.tokenizer.pad_token_id());
        let width = batch.width();

        let mut params = SamplingParams::from_config(&self.config, self.tokenizer.pad_token_id());
        params.num_return_sequences = num_return_sequences;
        match mode {
            SampleMode::Full => {
                params.max_length = max_length;
            }
            SampleMode::Continuation => {
                params.max_length = max_length + width;
                params.min_length = max_length;
            }
        }

        let sequences = self.model.generate(&batch, &params)?;
        let expected = batch.len() * num_return_sequences;
        if sequences.len() != expected {
            return Err(GenerationError::UnexpectedBatchSize {
                expected,
                actual: sequences.len(),
            }
            .into());
        }

        let mut out = Vec::with_capacity(expected);
        for (row, sequence) in sequences.iter().enumerate() {
            let generated_from = width.min(sequence.len());
            let end = self.last_sentence_end(sequence, generated_from);
            let decode_from = match mode {
                SampleMode::Full => 0,
                SampleMode::Continuation => generated_from,
            };
            let decoded = self.tokenizer.decode(&sequence[decode_from..end], true)?;
            let prompt = &prompts[row / num_return_sequences];

            match postprocess(&decoded, prompt, mode) {
                Some(text) => out.push(text),
                None => debug!(row, "dropped degenerate generation"),
            }
        }

        debug!(
            model = self.model.name(),
            requested = expected,
            returned = out.len(),
            "sampled sequences"
        );
        Ok(out)
    }

    /// Exclusive end of the kept span: one past the last end-of-sentence
    /// token at or after `generated_from`, else the full sequence.
    fn last_sentence_end(&self, sequence: &[u32], generated_from: usize) -> usize {
        sequence[generated_from..]
            .iter()
            .rposition(|id| self.end_of_sentence_ids.contains(id))
            .map(|i| generated_from + i + 1)
            .unwrap_or(sequence.len())
    }
}

/// Strip, drop the replacement character, and in continuation mode prefix a
/// space when the prompt does not end in whitespace. Continuations of at
/// most [`MAX_DEGENERATE_CHARS`] characters are rejected.
fn postprocess(decoded: &str, prompt: &str, mode: SampleMode) -> Option<String> {
    let cleaned: String = decoded.chars().filter(|&c| c != REPLACEMENT_CHAR).collect();
    let text = cleaned.trim();

    match mode {
        SampleMode::Full => Some(text.to_string()),
        SampleMode::Continuation => {
            if text.chars().count() <= MAX_DEGENERATE_CHARS {
                return None;
            }
            if prompt.ends_with(char::is_whitespace) || prompt.is_empty() {
                Some(text.to_string())
            } else {
                Some(format!(" {text}"))
            }
        }
    }
}
