//! Stop-word and frequent-word reference sets.

use std::collections::HashSet;
use std::path::Path;

use fable_core::errors::{FableError, FableResult};

/// English stop words, lowercase.
const ENGLISH_STOP_WORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "almost", "alone", "along",
    "already", "also", "although", "always", "am", "among", "an", "and", "another", "any",
    "anyone", "anything", "are", "around", "as", "at", "back", "be", "became", "because",
    "become", "been", "before", "behind", "being", "below", "between", "both", "but", "by",
    "can", "cannot", "could", "did", "do", "does", "doing", "done", "down", "during", "each",
    "either", "else", "enough", "even", "ever", "every", "few", "for", "from", "further",
    "get", "had", "has", "have", "having", "he", "her", "here", "hers", "herself", "him",
    "himself", "his", "how", "however", "i", "if", "in", "into", "is", "it", "its", "itself",
    "just", "least", "less", "many", "may", "me", "might", "mine", "more", "most", "much",
    "must", "my", "myself", "neither", "never", "no", "nobody", "none", "nor", "not",
    "nothing", "now", "of", "off", "often", "on", "once", "one", "only", "onto", "or",
    "other", "others", "our", "ours", "ourselves", "out", "over", "own", "perhaps", "rather",
    "same", "she", "should", "since", "so", "some", "someone", "something", "still", "such",
    "than", "that", "the", "their", "theirs", "them", "themselves", "then", "there",
    "therefore", "these", "they", "this", "those", "though", "through", "thus", "to", "too",
    "toward", "under", "until", "up", "upon", "us", "very", "was", "we", "were", "what",
    "whatever", "when", "where", "whether", "which", "while", "who", "whom", "whose", "why",
    "will", "with", "within", "without", "would", "yet", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Frequent content words of children's stories; a text sharing many of
/// them reads as simpler.
const FREQUENT_WORDS: &[&str] = &[
    "said", "day", "time", "little", "big", "old", "new", "good", "bad", "went", "came",
    "come", "go", "going", "saw", "see", "looked", "look", "man", "woman", "boy", "girl",
    "king", "queen", "prince", "princess", "mother", "father", "sister", "brother", "friend",
    "friends", "home", "house", "tree", "trees", "forest", "water", "river", "sea", "sun",
    "moon", "star", "stars", "sky", "night", "morning", "long", "away", "made", "make",
    "took", "take", "know", "knew", "think", "thought", "told", "tell", "asked", "ask",
    "wanted", "want", "like", "liked", "love", "loved", "happy", "sad", "great", "small",
    "first", "last", "way", "found", "find", "left", "right", "head", "eyes", "hand",
    "hands", "face", "heart", "life", "world", "people", "children", "child", "dog", "cat",
    "bird", "birds", "fox", "wolf", "bear", "horse", "fish", "flower", "flowers", "garden",
    "castle", "village", "town", "road", "door", "window", "room", "bed", "food", "bread",
    "gold", "red", "white", "black", "green", "blue", "bright", "dark", "cold", "warm",
    "light", "fire", "snow", "rain", "wind", "stone", "mountain", "hill", "field", "land",
    "ran", "run", "walked", "walk", "played", "play", "sat", "sit", "stood", "felt", "feel",
    "heard", "hear", "began", "turned", "called", "gave", "give", "got", "put", "kept",
    "brought", "beautiful", "young", "poor", "rich", "wise", "strong", "kind", "brave",
    "fast", "slow", "tall", "deep", "high", "soon", "later", "together", "alone", "again",
];

/// Case-insensitive stop-word set.
#[derive(Debug, Clone)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn english() -> Self {
        Self {
            words: ENGLISH_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    /// Words of `words` that are not stop words, in order.
    pub fn filter<'a>(&self, words: &'a [String]) -> Vec<&'a str> {
        words
            .iter()
            .map(String::as_str)
            .filter(|w| !self.contains(w))
            .collect()
    }
}

impl Default for StopWords {
    fn default() -> Self {
        Self::english()
    }
}

/// Reference set of the most frequent corpus words, lowercase.
#[derive(Debug, Clone)]
pub struct FrequentWords {
    words: HashSet<String>,
}

impl FrequentWords {
    pub fn builtin() -> Self {
        Self {
            words: FREQUENT_WORDS.iter().map(|w| w.to_string()).collect(),
        }
    }

    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| w.as_ref().trim().to_lowercase())
                .filter(|w| !w.is_empty())
                .collect(),
        }
    }

    /// Load a newline-separated word list.
    pub fn load(path: impl AsRef<Path>) -> FableResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            FableError::ConfigError(format!(
                "failed to read frequent words {}: {e}",
                path.display()
            ))
        })?;
        Ok(Self::from_words(content.lines()))
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for FrequentWords {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_words_are_case_insensitive() {
        let sw = StopWords::english();
        assert!(sw.contains("The"));
        assert!(sw.contains("the"));
        assert!(!sw.contains("fox"));
    }

    #[test]
    fn filter_keeps_order() {
        let sw = StopWords::english();
        let words: Vec<String> = ["the", "red", "fox", "and", "owl"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(sw.filter(&words), vec!["red", "fox", "owl"]);
    }

    #[test]
    fn frequent_words_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("freq.txt");
        std::fs::write(&path, "Sun\nmoon\n\n  star \n").unwrap();
        let fw = FrequentWords::load(&path).unwrap();
        assert_eq!(fw.len(), 3);
        assert!(fw.contains("sun"));
        assert!(fw.contains("star"));
    }

    #[test]
    fn builtin_frequent_words_are_lowercase() {
        let fw = FrequentWords::builtin();
        assert!(fw.contains("fox"));
        assert!(!fw.is_empty());
    }
}
