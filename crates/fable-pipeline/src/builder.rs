//! Assembles a [`StoryPipeline`] from its collaborators.
//!
//! Only the two language models and the tokenizer are mandatory. The rest
//! falls back to what the config describes: the corpus is read from
//! `retrieval.corpus_path`, the LSA embedder is fit on it, images are served
//! from `retrieval.image_dir` and the scorer loads its word lists.

use std::sync::Arc;

use tracing::info;

use fable_core::config::{FableConfig, RetrievalStrategy};
use fable_core::errors::{FableError, FableResult};
use fable_core::traits::{
    ImageClassifier, ImageStore, LanguageModel, PosTagger, StyleTransform, TextEmbedder, Tokenizer,
};
use fable_embeddings::{CachedEmbedder, LsaEmbedder};
use fable_generation::{IterativeGenerator, SequenceSampler};
use fable_imaging::ImageStyle;
use fable_ranking::FeatureScorer;
use fable_retrieval::{CorpusIndex, FsImageStore, ImageCorpus, ImageRetriever};
use fable_text::TermExtractor;
use fable_tokens::TokenCounter;

use crate::pipeline::StoryPipeline;
use crate::session::SessionManager;

/// Token-length cache entries kept by the generator.
const TOKEN_COUNT_CACHE_CAPACITY: u64 = 10_000;

#[derive(Default)]
pub struct StoryPipelineBuilder {
    config: FableConfig,
    finetuned: Option<Arc<dyn LanguageModel>>,
    preset: Option<Arc<dyn LanguageModel>>,
    tokenizer: Option<Arc<dyn Tokenizer>>,
    corpus: Option<ImageCorpus>,
    index: Option<CorpusIndex>,
    embedder: Option<Arc<dyn TextEmbedder>>,
    image_store: Option<Arc<dyn ImageStore>>,
    classifier: Option<Arc<dyn ImageClassifier>>,
    style_transform: Option<Arc<dyn StyleTransform>>,
    scorer: Option<FeatureScorer>,
    tagger: Option<Arc<dyn PosTagger>>,
}

impl StoryPipelineBuilder {
    pub fn config(mut self, config: FableConfig) -> Self {
        self.config = config;
        self
    }

    /// The model stories are sampled from.
    pub fn finetuned_model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.finetuned = Some(model);
        self
    }

    /// The reference model for the divergence feature.
    pub fn preset_model(mut self, model: Arc<dyn LanguageModel>) -> Self {
        self.preset = Some(model);
        self
    }

    pub fn tokenizer(mut self, tokenizer: Arc<dyn Tokenizer>) -> Self {
        self.tokenizer = Some(tokenizer);
        self
    }

    /// Captioned corpus, instead of loading `retrieval.corpus_path`.
    pub fn corpus(mut self, corpus: ImageCorpus) -> Self {
        self.corpus = Some(corpus);
        self
    }

    /// Ready-made corpus index. Needs a matching [`Self::embedder`].
    pub fn index(mut self, index: CorpusIndex) -> Self {
        self.index = Some(index);
        self
    }

    /// Query embedder, instead of fitting LSA on the corpus.
    pub fn embedder(mut self, embedder: Arc<dyn TextEmbedder>) -> Self {
        self.embedder = Some(embedder);
        self
    }

    pub fn image_store(mut self, store: Arc<dyn ImageStore>) -> Self {
        self.image_store = Some(store);
        self
    }

    /// Enables image coherence re-ranking.
    pub fn classifier(mut self, classifier: Arc<dyn ImageClassifier>) -> Self {
        self.classifier = Some(classifier);
        self
    }

    /// Transform behind the configured `imaging.style`.
    pub fn style_transform(mut self, transform: Arc<dyn StyleTransform>) -> Self {
        self.style_transform = Some(transform);
        self
    }

    pub fn scorer(mut self, scorer: FeatureScorer) -> Self {
        self.scorer = Some(scorer);
        self
    }

    /// Restricts retrieval terms to nouns.
    pub fn tagger(mut self, tagger: Arc<dyn PosTagger>) -> Self {
        self.tagger = Some(tagger);
        self
    }

    pub fn build(self) -> FableResult<StoryPipeline> {
        let config = self.config;
        config.validate()?;

        let finetuned = self.finetuned.ok_or_else(|| missing("finetuned_model"))?;
        let preset = self.preset.ok_or_else(|| missing("preset_model"))?;
        let tokenizer = self.tokenizer.ok_or_else(|| missing("tokenizer"))?;

        let (index, embedder) = match (self.index, self.embedder) {
            (Some(index), Some(embedder)) => (index, embedder),
            (Some(_), None) => {
                return Err(FableError::ConfigError(
                    "a prebuilt corpus index needs the embedder it was built with".to_string(),
                ))
            }
            (None, embedder) => {
                let corpus = match self.corpus {
                    Some(corpus) => corpus,
                    None => ImageCorpus::load_jsonl(&config.retrieval.corpus_path)?,
                };
                let embedder: Arc<dyn TextEmbedder> = match (embedder, config.retrieval.strategy) {
                    (Some(embedder), _) => embedder,
                    (None, RetrievalStrategy::Lsa) => Arc::new(LsaEmbedder::fit_capped(
                        &corpus.descriptions(),
                        config.retrieval.lsa_dimensions,
                        config.retrieval.lsa_max_vocabulary,
                    )?),
                    (None, RetrievalStrategy::Joint) => {
                        return Err(FableError::ConfigError(
                            "the joint retrieval strategy needs an embedder".to_string(),
                        ))
                    }
                };
                (CorpusIndex::build(corpus, embedder.as_ref())?, embedder)
            }
        };

        let query_embedder: Arc<dyn TextEmbedder> = Arc::new(CachedEmbedder::new(
            embedder,
            config.retrieval.embedding_cache_size,
        ));

        let scorer = match self.scorer {
            Some(scorer) => scorer,
            None => FeatureScorer::from_config(config.ranking.clone())?,
        };

        let sampler = SequenceSampler::new(finetuned, tokenizer.clone(), config.generation.clone())?;
        let counter = TokenCounter::new(tokenizer, TOKEN_COUNT_CACHE_CAPACITY);
        let generator = IterativeGenerator::new(
            Arc::new(sampler),
            Arc::new(scorer),
            Arc::new(counter),
            preset,
        )
        .with_embedder(query_embedder.clone());

        let terms = match self.tagger {
            Some(tagger) => TermExtractor::default().with_tagger(tagger),
            None => TermExtractor::default(),
        };
        let retriever = ImageRetriever::new(
            Arc::new(index),
            query_embedder,
            terms,
            config.retrieval.clone(),
        );

        let image_store = self.image_store.unwrap_or_else(|| {
            Arc::new(FsImageStore::new(
                &config.retrieval.image_dir,
                config.imaging.image_extension.clone(),
            ))
        });
        let style = ImageStyle::from_kind(config.imaging.style, self.style_transform)?;

        info!(
            version = fable_core::constants::VERSION,
            strategy = ?config.retrieval.strategy,
            corpus = retriever.index().len(),
            style = style.name(),
            classifier = self.classifier.is_some(),
            "story pipeline ready"
        );

        Ok(StoryPipeline {
            config,
            generator,
            retriever,
            image_store,
            classifier: self.classifier,
            style,
            sessions: SessionManager::new(),
        })
    }
}

fn missing(what: &str) -> FableError {
    FableError::ConfigError(format!("story pipeline needs a {what}"))
}
