use serde::{Deserialize, Serialize};

use super::defaults;

/// Feature scoring configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankingConfig {
    /// Diversity is 0 below this many unique non-stop words.
    pub min_words_per_story: usize,
    /// Model divergence is 0 for texts shorter than this (characters).
    pub min_divergence_chars: usize,
    /// Whether the coherency feature is computed (else stored as 0).
    pub coherency_enabled: bool,
    /// Optional newline-separated frequent-word list replacing the built-in set.
    pub frequent_words_path: Option<String>,
    /// Optional SentiWordNet file. Without it, sentiment scores 0.
    pub lexicon_path: Option<String>,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            min_words_per_story: defaults::DEFAULT_MIN_WORDS_PER_STORY,
            min_divergence_chars: defaults::DEFAULT_MIN_DIVERGENCE_CHARS,
            coherency_enabled: defaults::DEFAULT_COHERENCY_ENABLED,
            frequent_words_path: None,
            lexicon_path: None,
        }
    }
}
