use serde::{Deserialize, Serialize};

use super::defaults;

/// Story pipeline orchestration configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Candidate stories produced per full-story request.
    pub max_text_samples: usize,
    /// Top-ranked stories that get images (and coherence re-ranking).
    pub stories_to_illustrate: usize,
    pub autocomplete_max_length: usize,
    pub autocomplete_num_return: usize,
    /// Sampled pool re-ranked down to `autocomplete_num_return`. Ignored unless larger.
    pub autocomplete_re_rank_pool: usize,
    pub user_images_per_request: usize,
    /// Re-order illustrated stories by image coherence when a classifier is wired.
    pub image_coherence_rerank: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_text_samples: defaults::DEFAULT_MAX_TEXT_SAMPLES,
            stories_to_illustrate: defaults::DEFAULT_STORIES_TO_ILLUSTRATE,
            autocomplete_max_length: defaults::DEFAULT_AUTOCOMPLETE_MAX_LENGTH,
            autocomplete_num_return: defaults::DEFAULT_AUTOCOMPLETE_NUM_RETURN,
            autocomplete_re_rank_pool: defaults::DEFAULT_AUTOCOMPLETE_RE_RANK_POOL,
            user_images_per_request: defaults::DEFAULT_USER_IMAGES_PER_REQUEST,
            image_coherence_rerank: defaults::DEFAULT_IMAGE_COHERENCE_RERANK,
        }
    }
}
