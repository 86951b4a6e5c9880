//! Iterative, length-bounded story generation with re-ranking between
//! rounds.
//!
//! Each round extends every surviving text by `tokens_per_round` tokens,
//! producing enough candidates to cover `num_samples`, then keeps the best
//! `inter_ranking_keep`. Rounds stop once the integer mean token length
//! reaches the target (or `max_rounds` is hit); one terminal round then
//! yields exactly `num_samples` texts.

use std::sync::Arc;

use tracing::{debug, info, warn};

use fable_core::config::GenerationConfig;
use fable_core::errors::{FableResult, GenerationError};
use fable_core::traits::{LanguageModel, TextEmbedder};
use fable_ranking::{FeatureScorer, ScoringModels};
use fable_tokens::TokenCounter;

use crate::sampler::{SampleMode, SequenceSampler};

/// Parameters of one `sample_stories_texts` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryRequest {
    pub num_samples: usize,
    pub target_max_length: usize,
    /// Empty means the configured starting prompts.
    pub seed_prompts: Vec<String>,
    pub inter_ranking_keep: usize,
    pub tokens_per_round: usize,
}

impl StoryRequest {
    /// Request with the configured round parameters.
    pub fn from_config(config: &GenerationConfig, num_samples: usize) -> Self {
        Self {
            num_samples,
            target_max_length: config.target_max_length,
            seed_prompts: Vec::new(),
            inter_ranking_keep: config.inter_ranking_keep,
            tokens_per_round: config.tokens_per_round,
        }
    }

    pub fn with_prompts(mut self, prompts: Vec<String>) -> Self {
        self.seed_prompts = prompts;
        self
    }
}

/// Result of a generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationOutcome {
    /// Exactly `num_samples` texts unless the model returned fewer.
    pub texts: Vec<String>,
    /// Sampling passes made, including the terminal one.
    pub rounds: usize,
    /// Whether growth stopped at `max_rounds` before reaching the target.
    pub capped: bool,
}

pub struct IterativeGenerator {
    sampler: Arc<SequenceSampler>,
    scorer: Arc<FeatureScorer>,
    counter: Arc<TokenCounter>,
    preset: Arc<dyn LanguageModel>,
    embedder: Option<Arc<dyn TextEmbedder>>,
}

impl IterativeGenerator {
    pub fn new(
        sampler: Arc<SequenceSampler>,
        scorer: Arc<FeatureScorer>,
        counter: Arc<TokenCounter>,
        preset: Arc<dyn LanguageModel>,
    ) -> Self {
        Self {
            sampler,
            scorer,
            counter,
            preset,
            embedder: None,
        }
    }

    /// Embedder for the coherency feature.
    pub fn with_embedder(mut self, embedder: Arc<dyn TextEmbedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn sampler(&self) -> &Arc<SequenceSampler> {
        &self.sampler
    }

    pub fn scorer(&self) -> &Arc<FeatureScorer> {
        &self.scorer
    }

    /// Models a ranking round scores with.
    pub fn scoring_models(&self) -> ScoringModels<'_> {
        ScoringModels {
            tokenizer: self.sampler.tokenizer().as_ref(),
            preset: self.preset.as_ref(),
            finetuned: self.sampler.model().as_ref(),
            embedder: self.embedder.as_deref(),
        }
    }

    /// Grow seed prompts into `num_samples` full-length story texts.
    pub fn sample_stories_texts(&self, request: &StoryRequest) -> FableResult<GenerationOutcome> {
        if request.num_samples == 0 {
            return Err(GenerationError::InvalidParameter {
                name: "num_samples",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        if request.tokens_per_round == 0 {
            return Err(GenerationError::InvalidParameter {
                name: "tokens_per_round",
                reason: "must be at least 1 to make progress".to_string(),
            }
            .into());
        }

        let config = self.sampler.config();
        let mut texts = if request.seed_prompts.is_empty() {
            config.starting_prompts.clone()
        } else {
            request.seed_prompts.clone()
        };
        if texts.is_empty() {
            return Err(GenerationError::EmptyPrompts.into());
        }

        let (mut mean_len, mut max_len) = self.counter.length_stats(&texts)?;
        let mut rounds = 0;
        let mut capped = false;

        while mean_len < request.target_max_length {
            if rounds >= config.max_rounds {
                warn!(
                    rounds,
                    mean_len,
                    target = request.target_max_length,
                    "generation hit the round cap before reaching the target length"
                );
                capped = true;
                break;
            }

            let candidates = self.grow(&texts, max_len, request)?;
            texts = if request.inter_ranking_keep > 0 {
                self.scorer
                    .keep_best(candidates, request.inter_ranking_keep, &self.scoring_models())?
            } else {
                candidates
            };

            (mean_len, max_len) = self.counter.length_stats(&texts)?;
            rounds += 1;
            debug!(round = rounds, candidates = texts.len(), mean_len, max_len, "generation round");
        }

        let mut final_texts = self.grow(&texts, max_len, request)?;
        final_texts.truncate(request.num_samples);
        rounds += 1;

        info!(
            rounds,
            capped,
            returned = final_texts.len(),
            "generated story texts"
        );
        Ok(GenerationOutcome {
            texts: final_texts,
            rounds,
            capped,
        })
    }

    /// One sampling pass extending every text by `tokens_per_round`.
    fn grow(&self, texts: &[String], max_len: usize, request: &StoryRequest) -> FableResult<Vec<String>> {
        let num_return = request.num_samples.div_ceil(texts.len());
        let candidates = self.sampler.sample(
            texts,
            max_len + request.tokens_per_round,
            num_return,
            SampleMode::Full,
        )?;
        if candidates.is_empty() {
            return Err(GenerationError::NoCandidates.into());
        }
        Ok(candidates)
    }
}
