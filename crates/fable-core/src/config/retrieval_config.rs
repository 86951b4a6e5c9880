use serde::{Deserialize, Serialize};

use super::defaults;

/// Which embedding space image retrieval searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetrievalStrategy {
    /// TF-IDF + truncated SVD fit on the caption corpus.
    Lsa,
    /// A learned joint text/image space with precomputed corpus vectors.
    Joint,
}

/// Image retrieval configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RetrievalConfig {
    pub strategy: RetrievalStrategy,
    /// LSA buffer size is `buffer_multiplier * num_images`.
    pub buffer_multiplier: usize,
    /// Fixed buffer size for the joint strategy.
    pub joint_buffer_size: usize,
    /// Truncated SVD components. Clamped to the corpus rank.
    pub lsa_dimensions: usize,
    /// Most document-frequent terms kept when fitting LSA. Bounds the
    /// term Gram matrix, which is dense and quadratic in this size.
    pub lsa_max_vocabulary: usize,
    /// Extracts (and images) per generated story.
    pub images_per_story: usize,
    /// JSON Lines file of `{"image_id", "description"}` rows.
    pub corpus_path: String,
    /// Directory holding `<image_id>.<ext>` files.
    pub image_dir: String,
    /// Max cached query embeddings.
    pub embedding_cache_size: u64,
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self {
            strategy: RetrievalStrategy::Lsa,
            buffer_multiplier: defaults::DEFAULT_BUFFER_MULTIPLIER,
            joint_buffer_size: defaults::DEFAULT_JOINT_BUFFER_SIZE,
            lsa_dimensions: defaults::DEFAULT_LSA_DIMENSIONS,
            lsa_max_vocabulary: defaults::DEFAULT_LSA_MAX_VOCABULARY,
            images_per_story: defaults::DEFAULT_IMAGES_PER_STORY,
            corpus_path: defaults::DEFAULT_CORPUS_PATH.to_string(),
            image_dir: defaults::DEFAULT_IMAGE_DIR.to_string(),
            embedding_cache_size: defaults::DEFAULT_EMBEDDING_CACHE_SIZE,
        }
    }
}

impl RetrievalConfig {
    /// Number of ranked candidates inspected for `num_images` results.
    pub fn buffer_size(&self, num_images: usize) -> usize {
        match self.strategy {
            RetrievalStrategy::Lsa => self.buffer_multiplier * num_images,
            RetrievalStrategy::Joint => self.joint_buffer_size.max(num_images),
        }
    }
}
