use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::STARTING_PROMPTS;

/// Sampling and iterative-generation configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Softmax temperature for stochastic sampling.
    pub temperature: f32,
    /// Top-k filter size. 0 disables the filter.
    pub top_k: usize,
    /// Nucleus (top-p) probability mass.
    pub top_p: f32,
    /// 1.0 means no penalty.
    pub repetition_penalty: f32,
    /// Minimum total length for non-continuation sampling.
    pub min_length: usize,
    /// New tokens added per generation round.
    pub tokens_per_round: usize,
    /// Mean token length at which iterative generation stops.
    pub target_max_length: usize,
    /// Candidates kept between rounds. 0 keeps every candidate.
    pub inter_ranking_keep: usize,
    /// Upper bound on growth rounds before the terminal round.
    pub max_rounds: usize,
    /// Seed titles used when the caller gives none.
    pub starting_prompts: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: defaults::DEFAULT_TEMPERATURE,
            top_k: defaults::DEFAULT_TOP_K,
            top_p: defaults::DEFAULT_TOP_P,
            repetition_penalty: defaults::DEFAULT_REPETITION_PENALTY,
            min_length: defaults::DEFAULT_MIN_LENGTH,
            tokens_per_round: defaults::DEFAULT_TOKENS_PER_ROUND,
            target_max_length: defaults::DEFAULT_TARGET_MAX_LENGTH,
            inter_ranking_keep: defaults::DEFAULT_INTER_RANKING_KEEP,
            max_rounds: defaults::DEFAULT_MAX_ROUNDS,
            starting_prompts: STARTING_PROMPTS.iter().map(|p| p.to_string()).collect(),
        }
    }
}
