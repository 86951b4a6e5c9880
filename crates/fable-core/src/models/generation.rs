use serde::{Deserialize, Serialize};

use crate::config::GenerationConfig;

/// Parameters forwarded to [`crate::traits::LanguageModel::generate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SamplingParams {
    /// Total sequence length (prompt width + new tokens).
    pub max_length: usize,
    pub min_length: usize,
    pub temperature: f32,
    pub top_k: usize,
    pub top_p: f32,
    pub repetition_penalty: f32,
    pub num_return_sequences: usize,
    pub pad_token_id: u32,
}

impl SamplingParams {
    pub fn from_config(config: &GenerationConfig, pad_token_id: u32) -> Self {
        Self {
            max_length: 0,
            min_length: config.min_length,
            temperature: config.temperature,
            top_k: config.top_k,
            top_p: config.top_p,
            repetition_penalty: config.repetition_penalty,
            num_return_sequences: 1,
            pad_token_id,
        }
    }
}

/// A left-padded batch of prompts. Every row has the same width; padding
/// sits at the front so sampled tokens always follow real prompt tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptBatch {
    pub input_ids: Vec<Vec<u32>>,
    /// 1 for real tokens, 0 for padding.
    pub attention_mask: Vec<Vec<u8>>,
}

impl PromptBatch {
    /// Left-pad encoded prompts to the longest one.
    pub fn left_padded(encoded: Vec<Vec<u32>>, pad_token_id: u32) -> Self {
        let width = encoded.iter().map(Vec::len).max().unwrap_or(0);
        let mut input_ids = Vec::with_capacity(encoded.len());
        let mut attention_mask = Vec::with_capacity(encoded.len());
        for ids in encoded {
            let pad = width - ids.len();
            let mut row = vec![pad_token_id; pad];
            row.extend_from_slice(&ids);
            let mut mask = vec![0u8; pad];
            mask.extend(std::iter::repeat(1u8).take(ids.len()));
            input_ids.push(row);
            attention_mask.push(mask);
        }
        Self {
            input_ids,
            attention_mask,
        }
    }

    /// Padded prompt width.
    pub fn width(&self) -> usize {
        self.input_ids.first().map(Vec::len).unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.input_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.input_ids.is_empty()
    }
}
