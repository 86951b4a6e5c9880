use serde::{Deserialize, Serialize};

/// Coarse part-of-speech tags understood by the sentiment lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartOfSpeech {
    Adjective,
    Noun,
    Adverb,
    Verb,
}

impl PartOfSpeech {
    pub const ALL: [PartOfSpeech; 4] = [
        PartOfSpeech::Adjective,
        PartOfSpeech::Noun,
        PartOfSpeech::Adverb,
        PartOfSpeech::Verb,
    ];
}

/// Positive and negative scores of one word sense.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentiScore {
    pub positive: f64,
    pub negative: f64,
}

impl SentiScore {
    pub fn polarity(&self) -> f64 {
        self.positive - self.negative
    }
}
