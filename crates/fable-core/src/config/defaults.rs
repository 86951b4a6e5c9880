// Single source of truth for all default values.

// --- Generation ---
pub const DEFAULT_TEMPERATURE: f32 = 1.0;
pub const DEFAULT_TOP_K: usize = 50;
pub const DEFAULT_TOP_P: f32 = 0.95;
pub const DEFAULT_REPETITION_PENALTY: f32 = 1.0;
pub const DEFAULT_MIN_LENGTH: usize = 10;
pub const DEFAULT_TOKENS_PER_ROUND: usize = 50;
pub const DEFAULT_TARGET_MAX_LENGTH: usize = 200;
pub const DEFAULT_INTER_RANKING_KEEP: usize = 10;
pub const DEFAULT_MAX_ROUNDS: usize = 32;

// --- Ranking ---
pub const DEFAULT_MIN_WORDS_PER_STORY: usize = 5;
pub const DEFAULT_MIN_DIVERGENCE_CHARS: usize = 10;
pub const DEFAULT_COHERENCY_ENABLED: bool = false;

// --- Retrieval ---
pub const DEFAULT_BUFFER_MULTIPLIER: usize = 5;
pub const DEFAULT_JOINT_BUFFER_SIZE: usize = 30;
pub const DEFAULT_LSA_DIMENSIONS: usize = 500;
pub const DEFAULT_LSA_MAX_VOCABULARY: usize = 4096;
pub const DEFAULT_IMAGES_PER_STORY: usize = 3;
pub const DEFAULT_CORPUS_PATH: &str = "captions.jsonl";
pub const DEFAULT_IMAGE_DIR: &str = "images";
pub const DEFAULT_EMBEDDING_CACHE_SIZE: u64 = 10_000;

// --- Imaging ---
pub const DEFAULT_DOWNLOAD_THREADS: usize = 8;
pub const DEFAULT_DOWNLOAD_URL_TEMPLATE: &str =
    "https://unsplash.com/photos/{id}/download?force=true&w=640";
pub const DEFAULT_DOWNLOAD_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_IMAGE_EXTENSION: &str = "jpg";

// --- Pipeline ---
pub const DEFAULT_MAX_TEXT_SAMPLES: usize = 10;
pub const DEFAULT_STORIES_TO_ILLUSTRATE: usize = 3;
pub const DEFAULT_AUTOCOMPLETE_MAX_LENGTH: usize = 20;
pub const DEFAULT_AUTOCOMPLETE_NUM_RETURN: usize = 3;
pub const DEFAULT_AUTOCOMPLETE_RE_RANK_POOL: usize = 0;
pub const DEFAULT_USER_IMAGES_PER_REQUEST: usize = 3;
pub const DEFAULT_IMAGE_COHERENCE_RERANK: bool = true;

// --- Observability ---
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = true;
