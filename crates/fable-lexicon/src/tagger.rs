//! Context-free part-of-speech tagging from the lexicon's sense inventory.

use std::sync::Arc;

use fable_core::models::PartOfSpeech;
use fable_core::traits::{PosTagger, SentimentLexicon};

use crate::SentiWordNet;

/// Tie-break order when two parts of speech have equally many senses.
const PREFERENCE: [PartOfSpeech; 4] = [
    PartOfSpeech::Noun,
    PartOfSpeech::Verb,
    PartOfSpeech::Adjective,
    PartOfSpeech::Adverb,
];

/// Tags each word with the part of speech under which its lemma has the
/// most senses. Words the lexicon does not know get `None`.
#[derive(Debug, Clone)]
pub struct LexiconTagger {
    lexicon: Arc<SentiWordNet>,
}

impl LexiconTagger {
    pub fn new(lexicon: Arc<SentiWordNet>) -> Self {
        Self { lexicon }
    }

    pub fn tag_word(&self, word: &str) -> Option<PartOfSpeech> {
        let mut best: Option<(PartOfSpeech, usize)> = None;
        for pos in PREFERENCE {
            let Some(lemma) = self.lexicon.lemmatize(word, pos) else {
                continue;
            };
            let count = self.lexicon.sense_count(&lemma, pos);
            if best.map_or(true, |(_, c)| count > c) {
                best = Some((pos, count));
            }
        }
        best.map(|(pos, _)| pos)
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, words: &[String]) -> Vec<Option<PartOfSpeech>> {
        words.iter().map(|w| self.tag_word(w)).collect()
    }
}
