use std::sync::Arc;

use fable_core::errors::FableResult;
use fable_core::traits::Tokenizer;
use moka::sync::Cache;

/// Token counter over any [`Tokenizer`].
/// Caches results per blake3 content hash; generation re-measures the
/// surviving candidates every round.
pub struct TokenCounter {
    tokenizer: Arc<dyn Tokenizer>,
    cache: Cache<String, usize>,
}

impl TokenCounter {
    /// Create a new TokenCounter with the given cache capacity.
    pub fn new(tokenizer: Arc<dyn Tokenizer>, cache_capacity: u64) -> Self {
        Self {
            tokenizer,
            cache: Cache::new(cache_capacity),
        }
    }

    /// Count tokens in the given text (uncached).
    pub fn count(&self, text: &str) -> FableResult<usize> {
        Ok(self.tokenizer.encode(text)?.len())
    }

    /// Count tokens with blake3 content-hash caching.
    /// Repeated calls with the same text return the cached result.
    pub fn count_cached(&self, text: &str) -> FableResult<usize> {
        let hash = blake3::hash(text.as_bytes()).to_hex().to_string();
        if let Some(count) = self.cache.get(&hash) {
            return Ok(count);
        }
        let count = self.count(text)?;
        self.cache.insert(hash, count);
        Ok(count)
    }

    /// Integer mean and max token length of `texts`. Both 0 for no texts.
    pub fn length_stats(&self, texts: &[String]) -> FableResult<(usize, usize)> {
        if texts.is_empty() {
            return Ok((0, 0));
        }
        let mut total = 0usize;
        let mut max = 0usize;
        for text in texts {
            let n = self.count_cached(text)?;
            total += n;
            max = max.max(n);
        }
        Ok((total / texts.len(), max))
    }

    pub fn tokenizer(&self) -> &Arc<dyn Tokenizer> {
        &self.tokenizer
    }
}
