//! Feature scoring: one [`FeatureVector`] per candidate story.

use std::collections::HashSet;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::debug;

use fable_core::config::RankingConfig;
use fable_core::errors::FableResult;
use fable_core::traits::{LanguageModel, PosTagger, SentimentLexicon, TextEmbedder, Tokenizer};
use fable_core::{Feature, FeatureVector, ScoreMatrix};
use fable_lexicon::{LexiconTagger, SentiWordNet};
use fable_text::{split_to_sentences, FrequentWords, StopWords};

use crate::aggregator::sort_scores;
use crate::features;

/// Models a scoring round reads from. Borrowed for the round only.
#[derive(Clone, Copy)]
pub struct ScoringModels<'a> {
    pub tokenizer: &'a dyn Tokenizer,
    pub preset: &'a dyn LanguageModel,
    pub finetuned: &'a dyn LanguageModel,
    /// Needed only when coherency is enabled.
    pub embedder: Option<&'a dyn TextEmbedder>,
}

/// Computes every registered feature for candidate texts.
#[derive(Clone)]
pub struct FeatureScorer {
    config: RankingConfig,
    stop_words: StopWords,
    frequent_words: FrequentWords,
    tagger: Option<Arc<dyn PosTagger>>,
    lexicon: Option<Arc<dyn SentimentLexicon>>,
}

impl FeatureScorer {
    /// Scorer with the built-in word lists and no sentiment lexicon.
    pub fn new(config: RankingConfig) -> Self {
        Self {
            config,
            stop_words: StopWords::english(),
            frequent_words: FrequentWords::builtin(),
            tagger: None,
            lexicon: None,
        }
    }

    /// Scorer with the word list and lexicon files named in `config` loaded.
    pub fn from_config(config: RankingConfig) -> FableResult<Self> {
        let mut scorer = Self::new(config.clone());
        if let Some(path) = &config.frequent_words_path {
            scorer.frequent_words = FrequentWords::load(path)?;
        }
        if let Some(path) = &config.lexicon_path {
            let lexicon = Arc::new(SentiWordNet::load(path)?);
            let tagger = Arc::new(LexiconTagger::new(lexicon.clone()));
            scorer = scorer.with_sentiment(tagger, lexicon);
        }
        Ok(scorer)
    }

    pub fn with_frequent_words(mut self, frequent_words: FrequentWords) -> Self {
        self.frequent_words = frequent_words;
        self
    }

    pub fn with_sentiment(
        mut self,
        tagger: Arc<dyn PosTagger>,
        lexicon: Arc<dyn SentimentLexicon>,
    ) -> Self {
        self.tagger = Some(tagger);
        self.lexicon = Some(lexicon);
        self
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    /// Score one candidate.
    pub fn score_text(&self, text: &str, models: &ScoringModels<'_>) -> FableResult<FeatureVector> {
        let mut scores = FeatureVector::zeros();
        let sentences = split_to_sentences(text);

        if self.config.coherency_enabled {
            if let Some(embedder) = models.embedder {
                scores.set(Feature::Coherency, features::coherency(&sentences, embedder)?);
            }
        }

        scores.set(Feature::Readability, features::readability(text, &sentences));

        let words = features::filtered_words(text, &self.stop_words);
        let unique: HashSet<&str> = words.iter().map(String::as_str).collect();

        if let (Some(tagger), Some(lexicon)) = (&self.tagger, &self.lexicon) {
            scores.set(
                Feature::Sentiment,
                features::sentiment_polarity(&words, tagger.as_ref(), lexicon.as_ref()),
            );
        }

        scores.set(
            Feature::Simplicity,
            features::simplicity(&unique, &self.frequent_words),
        );
        scores.set(
            Feature::Diversity,
            features::diversity(&words, &unique, self.config.min_words_per_story),
        );
        scores.set(
            Feature::ModelDivergence,
            features::model_divergence(
                text,
                models.tokenizer,
                models.preset,
                models.finetuned,
                self.config.min_divergence_chars,
            )?,
        );

        Ok(scores)
    }

    /// Score a story given as extracts; they are joined with single spaces.
    pub fn score_extracts(
        &self,
        extracts: &[String],
        models: &ScoringModels<'_>,
    ) -> FableResult<FeatureVector> {
        self.score_text(&extracts.join(" "), models)
    }

    /// Score every candidate in parallel. Rows follow `texts` order.
    pub fn score_all(&self, texts: &[String], models: &ScoringModels<'_>) -> FableResult<ScoreMatrix> {
        let vectors = texts
            .par_iter()
            .map(|t| self.score_text(t, models))
            .collect::<FableResult<Vec<_>>>()?;
        Ok(ScoreMatrix::from_vectors(&vectors)?)
    }

    /// Candidate indices, best first.
    pub fn rank(&self, texts: &[String], models: &ScoringModels<'_>) -> FableResult<Vec<usize>> {
        let span = fable_core::ranking_span!(texts.len());
        let _guard = span.enter();

        let matrix = self.score_all(texts, models)?;
        let order = sort_scores(&matrix);
        debug!(candidates = texts.len(), best = ?order.first(), "ranked candidates");
        Ok(order)
    }

    /// `texts` reordered best first, truncated to `keep` (0 keeps all).
    pub fn keep_best(
        &self,
        texts: Vec<String>,
        keep: usize,
        models: &ScoringModels<'_>,
    ) -> FableResult<Vec<String>> {
        let order = self.rank(&texts, models)?;
        let mut slots: Vec<Option<String>> = texts.into_iter().map(Some).collect();
        let limit = if keep == 0 { order.len() } else { keep };
        Ok(order
            .into_iter()
            .take(limit)
            .filter_map(|i| slots[i].take())
            .collect())
    }
}

impl std::fmt::Debug for FeatureScorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeatureScorer")
            .field("config", &self.config)
            .field("frequent_words", &self.frequent_words.len())
            .field("sentiment", &self.lexicon.is_some())
            .finish()
    }
}
