use crate::models::{PartOfSpeech, SentiScore};

/// Assigns coarse part-of-speech tags. `None` marks words outside
/// the adjective/noun/adverb/verb set.
pub trait PosTagger: Send + Sync {
    fn tag(&self, words: &[String]) -> Vec<Option<PartOfSpeech>>;
}

/// Sense-level sentiment lookup.
pub trait SentimentLexicon: Send + Sync {
    /// Base form of `word` for `pos`, if the lexicon knows one.
    fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> Option<String>;

    /// Scores of the most common sense of `lemma` as `pos`.
    fn most_common_sense(&self, lemma: &str, pos: PartOfSpeech) -> Option<SentiScore>;
}
