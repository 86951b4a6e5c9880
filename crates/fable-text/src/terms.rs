//! Salient-term extraction: reduces an extract to the content words an
//! image caption is likely to share with it.

use std::collections::HashMap;
use std::sync::Arc;

use fable_core::constants::RETRIEVAL_IGNORED_TERM;
use fable_core::models::PartOfSpeech;
use fable_core::traits::PosTagger;

use crate::wordlists::StopWords;

/// Builds retrieval prompts from extracts.
///
/// Keeps alphabetic, non-stop tokens of two or more letters (only nouns when a tagger is wired),
/// ordered by descending frequency with first-seen order on ties.
#[derive(Clone)]
pub struct TermExtractor {
    stop_words: StopWords,
    tagger: Option<Arc<dyn PosTagger>>,
}

impl TermExtractor {
    pub fn new(stop_words: StopWords) -> Self {
        Self {
            stop_words,
            tagger: None,
        }
    }

    pub fn with_tagger(mut self, tagger: Arc<dyn PosTagger>) -> Self {
        self.tagger = Some(tagger);
        self
    }

    /// Salient terms of `text`, most frequent first.
    pub fn terms(&self, text: &str) -> Vec<String> {
        let tokens: Vec<String> = text
            .split(|c: char| !c.is_alphabetic())
            .filter(|t| t.chars().count() > 1)
            .map(str::to_string)
            .collect();

        let tags = match &self.tagger {
            Some(tagger) => tagger.tag(&tokens),
            None => vec![Some(PartOfSpeech::Noun); tokens.len()],
        };

        let mut order: Vec<String> = Vec::new();
        let mut counts: HashMap<String, usize> = HashMap::new();
        for (token, tag) in tokens.into_iter().zip(tags) {
            if tag != Some(PartOfSpeech::Noun)
                || self.stop_words.contains(&token)
                || token.eq_ignore_ascii_case(RETRIEVAL_IGNORED_TERM)
            {
                continue;
            }
            let count = counts.entry(token.clone()).or_insert(0);
            if *count == 0 {
                order.push(token);
            }
            *count += 1;
        }

        // Stable sort keeps first-seen order among equal counts.
        order.sort_by(|a, b| counts[b].cmp(&counts[a]));
        order
    }

    /// Space-joined terms, or the original text when nothing survives.
    pub fn prompt(&self, text: &str) -> String {
        let terms = self.terms(text);
        if terms.is_empty() {
            text.to_string()
        } else {
            terms.join(" ")
        }
    }
}

impl Default for TermExtractor {
    fn default() -> Self {
        Self::new(StopWords::english())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NounsEndingInX;

    impl PosTagger for NounsEndingInX {
        fn tag(&self, words: &[String]) -> Vec<Option<PartOfSpeech>> {
            words
                .iter()
                .map(|w| {
                    if w.ends_with('x') {
                        Some(PartOfSpeech::Noun)
                    } else {
                        Some(PartOfSpeech::Verb)
                    }
                })
                .collect()
        }
    }

    #[test]
    fn orders_by_frequency_then_first_seen() {
        let ex = TermExtractor::default();
        let terms = ex.terms("The owl and the fox. The fox ran to the owl's den, fox!");
        assert_eq!(terms, vec!["fox", "owl", "ran", "den"]);
    }

    #[test]
    fn drops_stop_words_digits_and_chapter() {
        let ex = TermExtractor::default();
        assert_eq!(ex.terms("Chapter 12: the snow"), vec!["snow"]);
    }

    #[test]
    fn tagger_restricts_to_nouns() {
        let ex = TermExtractor::default().with_tagger(Arc::new(NounsEndingInX));
        assert_eq!(ex.terms("a red fox jumps over the box"), vec!["fox", "box"]);
    }

    #[test]
    fn prompt_falls_back_to_text() {
        let ex = TermExtractor::default();
        assert_eq!(ex.prompt("the and of"), "the and of");
        assert_eq!(ex.prompt("a red fox in the snow"), "red fox snow");
    }
}
