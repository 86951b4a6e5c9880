//! Readability: longer words and longer sentences read as more advanced.

use fable_text::split_words;
use fable_text::splitter::is_terminal;

/// Score assigned to a ratio whose denominator is zero.
const DEGENERATE_RATIO: f64 = -10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReadabilityStats {
    pub letters_per_word: f64,
    pub words_per_sentence: f64,
}

impl ReadabilityStats {
    pub fn compute(text: &str, sentences: &[String]) -> Self {
        let words = split_words(text);
        let num_words = words.len();
        let num_letters: usize = words.iter().map(|w| w.chars().count()).sum();
        let mut num_sentences = sentences.len();

        if num_sentences == 1 && is_sparse(&sentences[0], num_words) {
            num_sentences = 0;
        }

        Self {
            letters_per_word: ratio(num_letters, num_words),
            words_per_sentence: ratio(num_words, num_sentences),
        }
    }

    pub fn score(&self) -> f64 {
        0.5 * self.letters_per_word + self.words_per_sentence
    }
}

/// `0.5 * letters_per_word + words_per_sentence`.
pub fn readability(text: &str, sentences: &[String]) -> f64 {
    ReadabilityStats::compute(text, sentences).score()
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        DEGENERATE_RATIO
    } else {
        numerator as f64 / denominator as f64
    }
}

/// A lone "sentence" is sparse when it is mostly line breaks (titles, lists)
/// or has no terminal punctuation outside capitalized abbreviations.
fn is_sparse(sentence: &str, num_words: usize) -> bool {
    let newline_threshold = num_words / 4;
    sentence.matches('\n').count() > newline_threshold || !has_true_terminal(sentence)
}

fn has_true_terminal(sentence: &str) -> bool {
    let mut prev: Option<char> = None;
    for c in sentence.chars() {
        if is_terminal(c) && !prev.is_some_and(|p| p.is_ascii_uppercase()) {
            return true;
        }
        prev = Some(c);
    }
    false
}
