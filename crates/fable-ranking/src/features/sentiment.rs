//! Sentiment polarity from a sense-level lexicon.

use fable_core::traits::{PosTagger, SentimentLexicon};

/// Average `positive - negative` score of the most common sense of every
/// taggable word, scaled to 0..=100. Negative averages report 0; fewer than
/// two words score 0.
pub fn sentiment_polarity(
    words: &[String],
    tagger: &dyn PosTagger,
    lexicon: &dyn SentimentLexicon,
) -> f64 {
    if words.len() < 2 {
        return 0.0;
    }

    let cleaned: Vec<String> = words
        .iter()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()).to_string())
        .collect();
    let tags = tagger.tag(&cleaned);

    let polarities: Vec<f64> = cleaned
        .iter()
        .zip(tags)
        .filter_map(|(word, tag)| {
            let pos = tag?;
            let lemma = lexicon.lemmatize(word, pos)?;
            lexicon
                .most_common_sense(&lemma, pos)
                .map(|score| score.polarity())
        })
        .collect();

    if polarities.is_empty() {
        return 0.0;
    }
    let mean = polarities.iter().sum::<f64>() / polarities.len() as f64;
    ((mean * 100.0).trunc()).max(0.0)
}
