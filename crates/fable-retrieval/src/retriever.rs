//! Extract-to-image retrieval with duplicate suppression.

use std::sync::Arc;

use tracing::{debug, warn};

use fable_core::config::RetrievalConfig;
use fable_core::errors::{EmbeddingError, FableResult, RetrievalError};
use fable_core::traits::{ImageStore, TextEmbedder};
use fable_core::ImageAsset;
use fable_embeddings::rank_by_similarity;
use fable_text::TermExtractor;

use crate::index::CorpusIndex;

/// Up to `num_images` ids from `buffer`, in buffer order, none of them in
/// `prev_image_ids`.
///
/// When the buffer holds no previously used id this is simply its head.
/// Otherwise the buffer is walked, skipping used ids; running out before
/// `num_images` are found is logged and the shorter list returned.
pub fn select_unused(buffer: &[String], prev_image_ids: &[String], num_images: usize) -> Vec<String> {
    let is_used = |id: &String| prev_image_ids.contains(id);

    if !buffer.iter().any(is_used) {
        return buffer.iter().take(num_images).cloned().collect();
    }

    let mut selected: Vec<String> = Vec::with_capacity(num_images);
    for id in buffer {
        if selected.len() == num_images {
            break;
        }
        if !is_used(id) && !selected.contains(id) {
            selected.push(id.clone());
        }
    }
    if selected.len() < num_images {
        warn!(
            requested = num_images,
            found = selected.len(),
            buffer = buffer.len(),
            "retrieval buffer exhausted before enough unused images were found"
        );
    }
    selected
}

/// Images for one story, aligned with its extracts.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StoryImages {
    /// One image per extract, in extract order.
    pub images: Vec<ImageAsset>,
    /// Extracts that fell back to an image outside the unused buffer.
    pub fallbacks: usize,
    /// Image loads that failed and were skipped.
    pub load_failures: usize,
}

/// Ranks corpus images against story text.
pub struct ImageRetriever {
    index: Arc<CorpusIndex>,
    embedder: Arc<dyn TextEmbedder>,
    terms: TermExtractor,
    config: RetrievalConfig,
}

impl ImageRetriever {
    /// `embedder` must map text into the space `index` was built in.
    pub fn new(
        index: Arc<CorpusIndex>,
        embedder: Arc<dyn TextEmbedder>,
        terms: TermExtractor,
        config: RetrievalConfig,
    ) -> Self {
        Self {
            index,
            embedder,
            terms,
            config,
        }
    }

    pub fn index(&self) -> &Arc<CorpusIndex> {
        &self.index
    }

    pub fn config(&self) -> &RetrievalConfig {
        &self.config
    }

    /// Corpus rows ordered by similarity to the salient terms of `text`.
    pub fn rank(&self, text: &str) -> FableResult<Vec<(usize, f64)>> {
        let query = self.terms.prompt(text);
        let mut vectors = self.embedder.transform(std::slice::from_ref(&query))?;
        let vector = vectors.pop().ok_or_else(|| EmbeddingError::InferenceFailed {
            reason: format!("{} returned no vector for the query", self.embedder.name()),
        })?;
        Ok(rank_by_similarity(&vector, self.index.embeddings()))
    }

    /// The `num_images` best matching image ids for `text` that are not in
    /// `prev_image_ids`. May return fewer when the buffer runs out.
    pub fn retrieve_images_for_extract(
        &self,
        text: &str,
        num_images: usize,
        prev_image_ids: &[String],
    ) -> FableResult<Vec<String>> {
        if num_images == 0 {
            return Ok(Vec::new());
        }
        let span = fable_core::retrieval_span!(text, num_images);
        let _guard = span.enter();

        let buffer_size = self.config.buffer_size(num_images);
        let buffer: Vec<String> = self
            .rank(text)?
            .into_iter()
            .take(buffer_size)
            .filter_map(|(row, _)| self.index.image_id(row).map(str::to_string))
            .collect();

        let selected = select_unused(&buffer, prev_image_ids, num_images);
        debug!(
            buffer = buffer.len(),
            previous = prev_image_ids.len(),
            selected = selected.len(),
            "retrieved images"
        );
        Ok(selected)
    }

    /// Image ids of every corpus row, best match for `text` first.
    fn ranked_ids(&self, text: &str) -> FableResult<Vec<String>> {
        Ok(self
            .rank(text)?
            .into_iter()
            .filter_map(|(row, _)| self.index.image_id(row).map(str::to_string))
            .collect())
    }

    /// Exactly one image per extract, resolved through `store`.
    ///
    /// Each extract takes the first unused, loadable id in its buffer. Ids
    /// picked for earlier extracts count as used for later ones, in addition
    /// to `prev_image_ids`. An id that fails to load is logged, counted and
    /// skipped. When the buffer holds no unused loadable id the extract falls
    /// back to its best-ranked loadable image, even if already used. Fails
    /// only when no corpus image can be loaded for an extract.
    pub fn retrieve_images_for_story(
        &self,
        extracts: &[String],
        prev_image_ids: &[String],
        store: &dyn ImageStore,
    ) -> FableResult<StoryImages> {
        let mut used: Vec<String> = prev_image_ids.to_vec();
        let mut failed: Vec<String> = Vec::new();
        let mut story = StoryImages {
            images: Vec::with_capacity(extracts.len()),
            ..StoryImages::default()
        };

        let buffer_size = self.config.buffer_size(1);

        for (position, extract) in extracts.iter().enumerate() {
            let ranked = self.ranked_ids(extract)?;

            let mut chosen = None;
            for image_id in ranked.iter().take(buffer_size) {
                if used.contains(image_id) || failed.contains(image_id) {
                    continue;
                }
                if let Some(asset) = load_or_skip(store, image_id, &mut failed, &mut story.load_failures) {
                    chosen = Some(asset);
                    break;
                }
            }

            if chosen.is_none() {
                for image_id in &ranked {
                    if failed.contains(image_id) {
                        continue;
                    }
                    if let Some(asset) = load_or_skip(store, image_id, &mut failed, &mut story.load_failures) {
                        warn!(
                            extract = position,
                            image_id = %asset.image_id,
                            "no unused image in the retrieval buffer, falling back to the best match"
                        );
                        story.fallbacks += 1;
                        chosen = Some(asset);
                        break;
                    }
                }
            }

            let asset = chosen.ok_or(RetrievalError::NoLoadableImage {
                attempted: failed.len(),
            })?;
            used.push(asset.image_id.clone());
            story.images.push(asset);
        }

        debug!(
            extracts = extracts.len(),
            fallbacks = story.fallbacks,
            load_failures = story.load_failures,
            "retrieved story images"
        );
        Ok(story)
    }
}

/// Load `image_id`, or log the failure, remember the id and count it.
fn load_or_skip(
    store: &dyn ImageStore,
    image_id: &str,
    failed: &mut Vec<String>,
    load_failures: &mut usize,
) -> Option<ImageAsset> {
    match store.load(image_id) {
        Ok(asset) => Some(asset),
        Err(e) => {
            warn!(image_id, error = %e, "image failed to load, trying the next match");
            failed.push(image_id.to_string());
            *load_failures += 1;
            None
        }
    }
}
