//! Story pipeline operations.

use std::sync::Arc;

use tracing::{debug, info, warn};

use fable_core::config::FableConfig;
use fable_core::errors::{FableResult, GenerationError};
use fable_core::models::{GeneratedStory, StoryPhase};
use fable_core::traits::{ImageClassifier, ImageStore};
use fable_core::ImageAsset;
use fable_generation::{IterativeGenerator, SampleMode, StoryRequest};
use fable_imaging::{rank_by_coherence, ImageStyle};
use fable_ranking::{FeatureScorer, ScoringModels};
use fable_retrieval::ImageRetriever;
use fable_text::{collapse_whitespace, split_to_extracts, strip_title_line};

use crate::builder::StoryPipelineBuilder;
use crate::session::{lock, SessionManager, StorySession};

/// A candidate story split into extracts, with its retrieved images.
struct IllustratedStory {
    extracts: Vec<String>,
    images: Vec<ImageAsset>,
    load_failures: usize,
}

pub struct StoryPipeline {
    pub(crate) config: FableConfig,
    pub(crate) generator: IterativeGenerator,
    pub(crate) retriever: ImageRetriever,
    pub(crate) image_store: Arc<dyn ImageStore>,
    pub(crate) classifier: Option<Arc<dyn ImageClassifier>>,
    pub(crate) style: ImageStyle,
    pub(crate) sessions: SessionManager,
}

impl StoryPipeline {
    pub fn builder() -> StoryPipelineBuilder {
        StoryPipelineBuilder::default()
    }

    pub fn config(&self) -> &FableConfig {
        &self.config
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn scorer(&self) -> &FeatureScorer {
        self.generator.scorer()
    }

    pub fn scoring_models(&self) -> ScoringModels<'_> {
        self.generator.scoring_models()
    }

    pub fn retriever(&self) -> &ImageRetriever {
        &self.retriever
    }

    pub fn style(&self) -> &ImageStyle {
        &self.style
    }

    /// Cloned view of a session.
    pub fn session(&self, session_id: &str) -> FableResult<StorySession> {
        self.sessions.snapshot(session_id)
    }

    /// Begin a new story titled `title`, discarding the session's previous
    /// story. Returns the normalized prompt.
    pub fn start_story(&self, session_id: &str, title: &str) -> FableResult<String> {
        let prompt = format!("{}\n", title.trim());
        let session = self.sessions.get_or_create(session_id);
        let mut guard = lock(&session, session_id)?;
        guard.restart(prompt.clone());
        info!(session_id, prompt = %prompt.trim_end(), "started story");
        Ok(prompt)
    }

    /// Generate, rank and illustrate stories for the session's prompt and
    /// commit the best one to the session.
    pub fn generate_full_story(&self, session_id: &str) -> FableResult<GeneratedStory> {
        let span = fable_core::pipeline_span!("generate_full_story", session_id);
        let _guard = span.enter();

        let session = self.sessions.get(session_id)?;
        let mut session = lock(&session, session_id)?;
        let prompt = session.active_prompt()?.to_string();

        match self.run_full_story(&mut session, prompt) {
            Ok(story) => {
                session.phase = StoryPhase::Ready;
                Ok(story)
            }
            Err(e) => {
                warn!(session_id, error = %e, "story generation failed");
                session.phase = StoryPhase::Idle;
                Err(e)
            }
        }
    }

    fn run_full_story(&self, session: &mut StorySession, prompt: String) -> FableResult<GeneratedStory> {
        let pipeline = &self.config.pipeline;
        let images_per_story = self.config.retrieval.images_per_story;

        session.phase = StoryPhase::GeneratingText;
        let request = StoryRequest::from_config(&self.config.generation, pipeline.max_text_samples)
            .with_prompts(vec![prompt]);
        let outcome = self.generator.sample_stories_texts(&request)?;
        let rounds = outcome.rounds;
        let texts = if request.inter_ranking_keep > 0 {
            self.scorer()
                .keep_best(outcome.texts, 0, &self.scoring_models())?
        } else {
            outcome.texts
        };

        session.phase = StoryPhase::GeneratingImages;
        let mut stories = texts
            .iter()
            .take(pipeline.stories_to_illustrate.max(1))
            .map(|text| -> FableResult<IllustratedStory> {
                let extracts = split_to_extracts(text, images_per_story);
                let retrieved = self.retriever.retrieve_images_for_story(
                    &extracts,
                    &session.state.image_ids,
                    self.image_store.as_ref(),
                )?;
                Ok(IllustratedStory {
                    extracts,
                    images: retrieved.images,
                    load_failures: retrieved.load_failures,
                })
            })
            .collect::<FableResult<Vec<_>>>()?;
        let load_failures: usize = stories.iter().map(|s| s.load_failures).sum();
        if load_failures > 0 {
            warn!(load_failures, "skipped images that failed to load");
        }

        if pipeline.image_coherence_rerank && stories.len() > 1 {
            if let Some(classifier) = &self.classifier {
                let image_sets: Vec<Vec<ImageAsset>> =
                    stories.iter().map(|s| s.images.clone()).collect();
                let order = rank_by_coherence(classifier.as_ref(), &image_sets)?;
                let mut slots: Vec<Option<IllustratedStory>> =
                    stories.into_iter().map(Some).collect();
                stories = order.into_iter().filter_map(|i| slots[i].take()).collect();
                debug!(stories = stories.len(), "re-ranked stories by image coherence");
            }
        }

        let Some(best) = stories.into_iter().next() else {
            return Err(GenerationError::NoCandidates.into());
        };

        let images = if self.style.is_none() {
            best.images
        } else {
            session.phase = StoryPhase::StyleTransfer;
            self.style.style_all(&best.images)
        };

        let extracts: Vec<String> = best
            .extracts
            .iter()
            .enumerate()
            .map(|(i, extract)| {
                if i == 0 {
                    collapse_whitespace(strip_title_line(extract))
                } else {
                    collapse_whitespace(extract)
                }
            })
            .collect();
        let image_ids: Vec<String> = images.iter().map(|img| img.image_id.clone()).collect();

        session.state.extracts.extend(extracts.iter().cloned());
        session.state.image_ids.extend(image_ids.iter().cloned());

        info!(
            session_id = %session.session_id,
            rounds,
            load_failures,
            extracts = extracts.len(),
            images = image_ids.len(),
            style = self.style.name(),
            "generated full story"
        );
        Ok(GeneratedStory {
            extracts,
            image_ids,
            images,
        })
    }

    /// Continuations of `extract`.
    ///
    /// With `re_rank_pool > num_return` a pool of that many continuations is
    /// sampled and the best `num_return` are returned, best first. Otherwise
    /// `num_return` are sampled directly. Degenerate continuations are
    /// dropped, so fewer may come back.
    pub fn autocomplete(
        &self,
        extract: &str,
        max_length: usize,
        num_return: usize,
        re_rank_pool: usize,
    ) -> FableResult<Vec<String>> {
        if num_return == 0 {
            return Err(GenerationError::InvalidParameter {
                name: "num_return",
                reason: "must be at least 1".to_string(),
            }
            .into());
        }
        let sampler = self.generator.sampler();
        let prompts = [extract.to_string()];

        if re_rank_pool > num_return {
            let pool = sampler.sample(&prompts, max_length, re_rank_pool, SampleMode::Continuation)?;
            let sampled = pool.len();
            let best = self
                .scorer()
                .keep_best(pool, num_return, &self.scoring_models())?;
            debug!(sampled, returned = best.len(), "re-ranked autocomplete pool");
            return Ok(best);
        }
        sampler.sample(&prompts, max_length, num_return, SampleMode::Continuation)
    }

    /// Autocomplete with the configured length, count and pool.
    pub fn autocomplete_default(&self, extract: &str) -> FableResult<Vec<String>> {
        let p = &self.config.pipeline;
        self.autocomplete(
            extract,
            p.autocomplete_max_length,
            p.autocomplete_num_return,
            p.autocomplete_re_rank_pool,
        )
    }

    /// Images for a user-written extract, excluding every image the story
    /// already uses. The chosen ids are added to the story.
    pub fn retrieve_images_for_user_extract(
        &self,
        session_id: &str,
        extract: &str,
        num_images: usize,
    ) -> FableResult<Vec<String>> {
        let span = fable_core::pipeline_span!("retrieve_images_for_user_extract", session_id);
        let _guard = span.enter();

        let session = self.sessions.get(session_id)?;
        let mut session = lock(&session, session_id)?;
        let ids = self
            .retriever
            .retrieve_images_for_extract(extract, num_images, &session.state.image_ids)?;
        session.state.image_ids.extend(ids.iter().cloned());
        Ok(ids)
    }

    pub fn record_extract(&self, session_id: &str, extract: &str) -> FableResult<()> {
        let session = self.sessions.get(session_id)?;
        let mut session = lock(&session, session_id)?;
        session.record_extract(extract);
        debug!(session_id, extracts = session.state.extracts.len(), "recorded extract");
        Ok(())
    }

    /// Add an image to the story, or remove it when `remove` is set.
    pub fn record_image(&self, session_id: &str, image_id: &str, remove: bool) -> FableResult<()> {
        let session = self.sessions.get(session_id)?;
        let mut session = lock(&session, session_id)?;
        session.record_image(image_id, remove)?;
        debug!(session_id, image_id, remove, "recorded image");
        Ok(())
    }

    /// Named feature scores of a story given as extracts.
    pub fn score_story(&self, extracts: &[String]) -> FableResult<Vec<(&'static str, f64)>> {
        let scores = self
            .scorer()
            .score_extracts(extracts, &self.scoring_models())?;
        Ok(scores.named())
    }
}
