//! End-to-end pipeline behavior over the mock models and fixture corpus.

use std::sync::{Arc, Mutex};

use fable_core::config::{FableConfig, GenerationConfig, RetrievalStrategy, StyleKind};
use fable_core::errors::{FableError, FableResult, GenerationError, SessionError};
use fable_core::models::{PromptBatch, SamplingParams, StoryPhase};
use fable_core::traits::LanguageModel;
use fable_core::Feature;
use fable_generation::{SampleMode, SequenceSampler};
use fable_pipeline::{StoryPipeline, StoryPipelineBuilder};
use fable_retrieval::ImageCorpus;
use test_fixtures::{
    sample_corpus, MockClassifier, MockImageStore, MockLanguageModel, MockStyle, MockTokenizer,
};

/// Forwards to a mock model and keeps the last generated batch.
struct Recording {
    inner: MockLanguageModel,
    last: Mutex<Vec<Vec<u32>>>,
}

impl LanguageModel for Recording {
    fn generate(&self, batch: &PromptBatch, params: &SamplingParams) -> FableResult<Vec<Vec<u32>>> {
        let out = self.inner.generate(batch, params)?;
        *self.last.lock().unwrap() = out.clone();
        Ok(out)
    }

    fn logits(&self, input_ids: &[u32]) -> FableResult<Vec<Vec<f32>>> {
        self.inner.logits(input_ids)
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}

/// Returns a fixed batch.
struct Replay(Vec<Vec<u32>>);

impl LanguageModel for Replay {
    fn generate(&self, _batch: &PromptBatch, _params: &SamplingParams) -> FableResult<Vec<Vec<u32>>> {
        Ok(self.0.clone())
    }

    fn logits(&self, input_ids: &[u32]) -> FableResult<Vec<Vec<f32>>> {
        Ok(vec![vec![0.0; 4]; input_ids.len()])
    }

    fn name(&self) -> &str {
        "replay"
    }
}

fn small_config() -> FableConfig {
    let mut config = FableConfig::default();
    config.generation.target_max_length = 40;
    config.generation.tokens_per_round = 20;
    config.pipeline.max_text_samples = 4;
    config.pipeline.stories_to_illustrate = 2;
    config
}

struct Harness {
    tokenizer: Arc<MockTokenizer>,
    finetuned: Arc<Recording>,
    builder: StoryPipelineBuilder,
}

fn harness(config: FableConfig) -> Harness {
    let tokenizer = Arc::new(MockTokenizer::new());
    let (finetuned, preset) = MockLanguageModel::pair(tokenizer.clone());
    let finetuned = Arc::new(Recording {
        inner: finetuned,
        last: Mutex::new(Vec::new()),
    });
    let builder = StoryPipeline::builder()
        .config(config)
        .finetuned_model(finetuned.clone())
        .preset_model(Arc::new(preset))
        .tokenizer(tokenizer.clone())
        .corpus(ImageCorpus::from_records(sample_corpus()).unwrap())
        .image_store(Arc::new(MockImageStore::new()));
    Harness {
        tokenizer,
        finetuned,
        builder,
    }
}

fn pipeline() -> StoryPipeline {
    harness(small_config()).builder.build().unwrap()
}

#[test]
fn start_story_normalizes_title() {
    let pipeline = pipeline();
    let prompt = pipeline
        .start_story("s1", "  The Wonders of the Sun  ")
        .unwrap();
    assert_eq!(prompt, "The Wonders of the Sun\n");

    let session = pipeline.session("s1").unwrap();
    assert_eq!(session.prompt.as_deref(), Some("The Wonders of the Sun\n"));
    assert_eq!(session.phase, StoryPhase::Idle);
}

#[test]
fn full_story_is_illustrated_and_recorded() {
    let pipeline = pipeline();
    pipeline.start_story("s1", "The Wonders of the Sun").unwrap();
    let story = pipeline.generate_full_story("s1").unwrap();

    assert_eq!(story.extracts.len(), 3);
    assert!(!story.extracts[0].contains("Wonders"));
    for extract in &story.extracts {
        assert!(!extract.contains('\n'));
        assert!(!extract.contains("  "));
    }

    assert_eq!(story.image_ids.len(), 3);
    let mut unique = story.image_ids.clone();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), 3);
    let asset_ids: Vec<&str> = story.images.iter().map(|i| i.image_id.as_str()).collect();
    assert_eq!(asset_ids, story.image_ids);

    let session = pipeline.session("s1").unwrap();
    assert_eq!(session.phase, StoryPhase::Ready);
    assert_eq!(session.state.extracts, story.extracts);
    assert_eq!(session.state.image_ids, story.image_ids);
}

#[test]
fn nearly_exhausted_corpus_still_illustrates_every_extract() {
    let pipeline = pipeline();
    pipeline.start_story("s1", "The Wonders of the Sun").unwrap();
    for record in sample_corpus().into_iter().take(10) {
        pipeline.record_image("s1", &record.image_id, false).unwrap();
    }

    let story = pipeline.generate_full_story("s1").unwrap();
    assert!(!story.extracts.is_empty());
    assert_eq!(story.image_ids.len(), story.extracts.len());
    assert_eq!(story.images.len(), story.extracts.len());
}

#[test]
fn missing_image_file_does_not_abort_the_story() {
    let pipeline = harness(small_config())
        .builder
        .image_store(Arc::new(MockImageStore::new().without("castle-09")))
        .build()
        .unwrap();
    pipeline.start_story("s1", "The Old Castle on the Hill").unwrap();

    let story = pipeline.generate_full_story("s1").unwrap();
    assert_eq!(story.image_ids.len(), story.extracts.len());
    assert!(!story.image_ids.contains(&"castle-09".to_string()));
}

#[test]
fn full_story_reranks_by_coherence_and_styles() {
    let mut config = small_config();
    config.imaging.style = StyleKind::Comics;
    config.pipeline.stories_to_illustrate = 3;
    let pipeline = harness(config)
        .builder
        .classifier(Arc::new(MockClassifier))
        .style_transform(Arc::new(MockStyle::new("ink")))
        .build()
        .unwrap();

    pipeline.start_story("s1", "The Fox and the Old Lantern").unwrap();
    let story = pipeline.generate_full_story("s1").unwrap();
    assert!(!story.images.is_empty());
    for image in &story.images {
        assert_eq!(image.style.as_deref(), Some("comics"));
        assert!(image.bytes.ends_with(b"+ink"));
    }
}

#[test]
fn generating_without_a_session_fails() {
    let pipeline = pipeline();
    let err = pipeline.generate_full_story("nobody").unwrap_err();
    assert!(matches!(
        err,
        FableError::Session(SessionError::UnknownSession { .. })
    ));
}

#[test]
fn restarting_clears_previous_story() {
    let pipeline = pipeline();
    pipeline.start_story("s1", "The Boy and the Giant").unwrap();
    pipeline.generate_full_story("s1").unwrap();
    pipeline.start_story("s1", "A Kingdom Under the Sea").unwrap();

    let session = pipeline.session("s1").unwrap();
    assert!(session.state.extracts.is_empty());
    assert!(session.state.image_ids.is_empty());
}

#[test]
fn autocomplete_reranks_the_sampled_pool() {
    let h = harness(small_config());
    let tokenizer = h.tokenizer.clone();
    let finetuned = h.finetuned.clone();
    let pipeline = h.builder.build().unwrap();
    let extract = "Once the fox walked to the river";

    let out = pipeline.autocomplete(extract, 20, 3, 10).unwrap();
    assert_eq!(out.len(), 3);

    let recorded = finetuned.last.lock().unwrap().clone();
    assert_eq!(recorded.len(), 10);
    let replay = SequenceSampler::new(Arc::new(Replay(recorded)), tokenizer, GenerationConfig::default())
        .unwrap();
    let pool = replay
        .sample(&[extract.to_string()], 20, 10, SampleMode::Continuation)
        .unwrap();
    assert_eq!(pool.len(), 10);
    assert!(out.iter().all(|c| pool.contains(c)));

    let order = pipeline
        .scorer()
        .rank(&pool, &pipeline.scoring_models())
        .unwrap();
    let expected: Vec<String> = order.iter().take(3).map(|&i| pool[i].clone()).collect();
    assert_eq!(out, expected);
}

#[test]
fn autocomplete_without_pool_samples_directly() {
    let pipeline = pipeline();
    let out = pipeline
        .autocomplete("The sun rose over the hill", 20, 3, 0)
        .unwrap();
    assert_eq!(out.len(), 3);
    assert!(out.iter().all(|c| c.starts_with(' ')));
}

#[test]
fn autocomplete_rejects_zero_returns() {
    let pipeline = pipeline();
    for pool in [0, 10] {
        let err = pipeline
            .autocomplete("The fox walked to the river", 20, 0, pool)
            .unwrap_err();
        assert!(matches!(
            err,
            FableError::Generation(GenerationError::InvalidParameter { name: "num_return", .. })
        ));
    }
}

#[test]
fn user_extract_images_are_never_repeated() {
    let pipeline = pipeline();
    pipeline.start_story("s1", "The Fox and the Old Lantern").unwrap();

    let first = pipeline
        .retrieve_images_for_user_extract("s1", "a red fox in the snow", 3)
        .unwrap();
    let second = pipeline
        .retrieve_images_for_user_extract("s1", "a red fox in the snow", 3)
        .unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(second.len(), 3);
    assert!(second.iter().all(|id| !first.contains(id)));
    assert_eq!(pipeline.session("s1").unwrap().state.image_ids.len(), 6);
}

#[test]
fn sessions_do_not_share_used_images() {
    let pipeline = pipeline();
    pipeline.start_story("a", "The Fox and the Old Lantern").unwrap();
    pipeline.start_story("b", "The Fox and the Old Lantern").unwrap();

    let (a, b) = std::thread::scope(|scope| {
        let a = scope.spawn(|| {
            pipeline
                .retrieve_images_for_user_extract("a", "a red fox in the snow", 2)
                .unwrap()
        });
        let b = scope.spawn(|| {
            pipeline
                .retrieve_images_for_user_extract("b", "a red fox in the snow", 2)
                .unwrap()
        });
        (a.join().unwrap(), b.join().unwrap())
    });
    assert_eq!(a, b);
}

#[test]
fn record_operations_keep_state_in_sync() {
    let pipeline = pipeline();
    pipeline.start_story("s1", "The Little Star That Fell").unwrap();

    pipeline.record_extract("s1", "The star fell.").unwrap();
    pipeline.record_image("s1", "owl-night-08", false).unwrap();
    let session = pipeline.session("s1").unwrap();
    assert_eq!(session.state.extracts, vec!["The star fell."]);
    assert_eq!(session.state.image_ids, vec!["owl-night-08"]);

    let err = pipeline.record_image("s1", "castle-09", true).unwrap_err();
    assert!(matches!(
        err,
        FableError::Session(SessionError::ImageNotInStory { .. })
    ));

    pipeline.record_image("s1", "owl-night-08", true).unwrap();
    assert!(pipeline.session("s1").unwrap().state.image_ids.is_empty());
}

#[test]
fn recorded_images_are_excluded_from_retrieval() {
    let pipeline = pipeline();
    pipeline.start_story("s1", "The Fox and the Old Lantern").unwrap();
    pipeline.record_image("s1", "fox-snow-01", false).unwrap();

    let ids = pipeline
        .retrieve_images_for_user_extract("s1", "a red fox in the snow", 2)
        .unwrap();
    assert!(!ids.contains(&"fox-snow-01".to_string()));
}

#[test]
fn score_story_names_every_feature() {
    let pipeline = pipeline();
    let scores = pipeline
        .score_story(&[
            "The fox ran over the hill.".to_string(),
            "The sun was warm and golden.".to_string(),
        ])
        .unwrap();
    assert_eq!(scores.len(), Feature::COUNT);
    assert!(scores.iter().any(|(name, _)| *name == "readability"));
}

#[test]
fn builder_requires_models() {
    let err = StoryPipeline::builder().build().err().unwrap();
    assert!(matches!(err, FableError::ConfigError(_)));
}

#[test]
fn joint_strategy_needs_an_embedder() {
    let mut config = small_config();
    config.retrieval.strategy = RetrievalStrategy::Joint;
    let err = harness(config).builder.build().err().unwrap();
    assert!(matches!(err, FableError::ConfigError(_)));
}

#[test]
fn styled_config_needs_a_transform() {
    let mut config = small_config();
    config.imaging.style = StyleKind::Sketch;
    let err = harness(config).builder.build().err().unwrap();
    assert!(matches!(err, FableError::ConfigError(_)));
}
