//! Content-hash embedding cache in front of any [`TextEmbedder`].
//!
//! Keys are blake3 hashes of the text, values are embedding vectors.
//! Retrieval queries repeat often during interactive editing, so the
//! pipeline wraps its query embedder in this.

use std::sync::Arc;
use std::time::Duration;

use moka::sync::Cache;
use tracing::debug;

use fable_core::errors::FableResult;
use fable_core::traits::TextEmbedder;

pub struct CachedEmbedder {
    inner: Arc<dyn TextEmbedder>,
    cache: Cache<String, Vec<f32>>,
}

impl CachedEmbedder {
    pub fn new(inner: Arc<dyn TextEmbedder>, max_entries: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_idle(Duration::from_secs(3600))
            .build();
        Self { inner, cache }
    }

    /// Number of cached embeddings.
    pub fn len(&self) -> u64 {
        self.cache.run_pending_tasks();
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}

impl TextEmbedder for CachedEmbedder {
    fn transform(&self, texts: &[String]) -> FableResult<Vec<Vec<f32>>> {
        let keys: Vec<String> = texts
            .iter()
            .map(|t| blake3::hash(t.as_bytes()).to_hex().to_string())
            .collect();

        let mut out: Vec<Option<Vec<f32>>> = keys.iter().map(|k| self.cache.get(k)).collect();
        let missing: Vec<usize> = (0..texts.len()).filter(|&i| out[i].is_none()).collect();

        if !missing.is_empty() {
            let batch: Vec<String> = missing.iter().map(|&i| texts[i].clone()).collect();
            let embedded = self.inner.transform(&batch)?;
            for (&i, vector) in missing.iter().zip(embedded) {
                self.cache.insert(keys[i].clone(), vector.clone());
                out[i] = Some(vector);
            }
        }
        debug!(
            total = texts.len(),
            misses = missing.len(),
            embedder = self.inner.name(),
            "embedding cache lookup"
        );

        Ok(out.into_iter().map(Option::unwrap_or_default).collect())
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
