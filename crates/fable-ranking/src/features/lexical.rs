//! Word-set features: simplicity and diversity.

use std::collections::HashSet;

use fable_text::{split_words, FrequentWords, StopWords};

/// Lowercased words of `text` that are not stop words, punctuation kept.
pub fn filtered_words(text: &str, stop_words: &StopWords) -> Vec<String> {
    split_words(text.to_lowercase().trim())
        .into_iter()
        .filter(|w| !stop_words.contains(w))
        .collect()
}

/// Number of distinct words that are in the frequent-word reference set.
pub fn simplicity(unique_words: &HashSet<&str>, frequent: &FrequentWords) -> f64 {
    unique_words.iter().filter(|w| frequent.contains(w)).count() as f64
}

/// Unique over total filtered words; 0 when fewer than `min_words` are
/// unique.
pub fn diversity(words: &[String], unique_words: &HashSet<&str>, min_words: usize) -> f64 {
    if words.is_empty() || unique_words.len() < min_words {
        return 0.0;
    }
    unique_words.len() as f64 / words.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unique(words: &[String]) -> HashSet<&str> {
        words.iter().map(String::as_str).collect()
    }

    #[test]
    fn filters_stop_words_and_lowercases() {
        let words = filtered_words("  The Fox and the Owl ", &StopWords::english());
        assert_eq!(words, vec!["fox", "owl"]);
    }

    #[test]
    fn punctuation_stays_attached() {
        let words = filtered_words("The fox ran.", &StopWords::english());
        assert_eq!(words, vec!["fox", "ran."]);
    }

    #[test]
    fn simplicity_counts_frequent_words() {
        let words: Vec<String> = ["fox", "fox", "snow", "xylophone"].iter().map(|s| s.to_string()).collect();
        let frequent = FrequentWords::from_words(["fox", "snow", "sun"]);
        assert_eq!(simplicity(&unique(&words), &frequent), 2.0);
    }

    #[test]
    fn diversity_is_unique_ratio() {
        let words: Vec<String> = ["a1", "b1", "c1", "d1", "e1", "a1", "b1", "c1"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(diversity(&words, &unique(&words), 5), 5.0 / 8.0);
    }

    #[test]
    fn diversity_below_threshold_is_zero() {
        let words: Vec<String> = ["fox", "fox", "fox", "owl"].iter().map(|s| s.to_string()).collect();
        assert_eq!(diversity(&words, &unique(&words), 5), 0.0);
    }

    #[test]
    fn diversity_of_nothing_is_zero() {
        assert_eq!(diversity(&[], &HashSet::new(), 0), 0.0);
    }
}
