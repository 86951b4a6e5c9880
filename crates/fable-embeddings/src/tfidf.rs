//! TF-IDF vectorizer over a fixed vocabulary.
//!
//! Terms are lowercase runs of two or more word characters with English stop
//! words removed. Term frequency is sublinear (`1 + ln(count)`), inverse
//! document frequency is un-smoothed (`ln(n / df) + 1`), and every row is
//! L2-normalized.

use std::collections::HashMap;

use fable_core::errors::{EmbeddingError, FableResult};
use fable_text::StopWords;

/// Sparse row: `(term index, weight)` sorted by term index.
pub type SparseVector = Vec<(usize, f64)>;

#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
    stop_words: StopWords,
}

impl TfidfVectorizer {
    /// Learn vocabulary and idf weights from `texts`.
    pub fn fit(texts: &[String]) -> FableResult<Self> {
        Self::fit_with_limit(texts, None)
    }

    /// Like [`Self::fit`], keeping at most `max_features` terms: those with
    /// the highest document frequency, first-seen order on ties.
    pub fn fit_with_limit(texts: &[String], max_features: Option<usize>) -> FableResult<Self> {
        if texts.is_empty() {
            return Err(EmbeddingError::EmptyCorpus.into());
        }
        let stop_words = StopWords::english();

        let mut vocabulary: HashMap<String, usize> = HashMap::new();
        let mut doc_freq: Vec<usize> = Vec::new();
        for text in texts {
            let mut seen: Vec<usize> = Vec::new();
            for term in tokenize(text, &stop_words) {
                let next = vocabulary.len();
                let idx = *vocabulary.entry(term).or_insert(next);
                if idx == doc_freq.len() {
                    doc_freq.push(0);
                }
                if !seen.contains(&idx) {
                    seen.push(idx);
                    doc_freq[idx] += 1;
                }
            }
        }
        if let Some(limit) = max_features.filter(|&limit| limit < doc_freq.len()) {
            let mut by_df: Vec<usize> = (0..doc_freq.len()).collect();
            by_df.sort_by(|&a, &b| doc_freq[b].cmp(&doc_freq[a]));
            let mut keep = vec![false; doc_freq.len()];
            for &idx in by_df.iter().take(limit) {
                keep[idx] = true;
            }

            let mut remap = vec![None; doc_freq.len()];
            let mut next = 0;
            for (idx, slot) in remap.iter_mut().enumerate() {
                if keep[idx] {
                    *slot = Some(next);
                    next += 1;
                }
            }
            vocabulary = vocabulary
                .into_iter()
                .filter_map(|(term, idx)| remap[idx].map(|new| (term, new)))
                .collect();
            doc_freq = doc_freq
                .into_iter()
                .enumerate()
                .filter(|(idx, _)| keep[*idx])
                .map(|(_, df)| df)
                .collect();
        }
        if vocabulary.is_empty() {
            return Err(EmbeddingError::EmptyVocabulary.into());
        }

        let n = texts.len() as f64;
        let idf = doc_freq
            .iter()
            .map(|&df| (n / df as f64).ln() + 1.0)
            .collect();

        Ok(Self {
            vocabulary,
            idf,
            stop_words,
        })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// L2-normalized TF-IDF weights of `text`. Unknown terms are ignored;
    /// a text with no known terms maps to the empty vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        let mut counts: HashMap<usize, usize> = HashMap::new();
        for term in tokenize(text, &self.stop_words) {
            if let Some(&idx) = self.vocabulary.get(&term) {
                *counts.entry(idx).or_insert(0) += 1;
            }
        }

        let mut row: SparseVector = counts
            .into_iter()
            .map(|(idx, count)| (idx, (1.0 + (count as f64).ln()) * self.idf[idx]))
            .collect();
        row.sort_by_key(|(idx, _)| *idx);

        let norm = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > f64::EPSILON {
            for (_, w) in &mut row {
                *w /= norm;
            }
        }
        row
    }
}

/// Lowercase runs of at least two alphanumeric/underscore characters,
/// stop words removed.
fn tokenize(text: &str, stop_words: &StopWords) -> Vec<String> {
    text.split(|c: char| !c.is_alphanumeric() && c != '_')
        .filter(|s| s.chars().count() >= 2)
        .map(str::to_lowercase)
        .filter(|s| !stop_words.contains(s))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> Vec<String> {
        vec![
            "a red fox in the snow".to_string(),
            "a brown bear by the river".to_string(),
            "snow on the mountain".to_string(),
        ]
    }

    #[test]
    fn stop_words_and_short_tokens_are_excluded() {
        let v = TfidfVectorizer::fit(&corpus()).unwrap();
        // red fox snow brown bear river mountain
        assert_eq!(v.vocabulary_size(), 7);
    }

    #[test]
    fn rows_are_unit_norm() {
        let v = TfidfVectorizer::fit(&corpus()).unwrap();
        let row = v.transform("red fox red fox snow");
        let norm: f64 = row.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        assert!((norm - 1.0).abs() < 1e-9);
    }

    #[test]
    fn rarer_terms_weigh_more() {
        let v = TfidfVectorizer::fit(&corpus()).unwrap();
        let row = v.transform("fox snow");
        let fox = v.vocabulary["fox"];
        let snow = v.vocabulary["snow"];
        let weight = |idx: usize| row.iter().find(|(i, _)| *i == idx).unwrap().1;
        assert!(weight(fox) > weight(snow));
    }

    #[test]
    fn unknown_text_is_empty() {
        let v = TfidfVectorizer::fit(&corpus()).unwrap();
        assert!(v.transform("zebra xylophone").is_empty());
    }

    #[test]
    fn limit_keeps_most_document_frequent_terms() {
        let v = TfidfVectorizer::fit_with_limit(&corpus(), Some(2)).unwrap();
        assert_eq!(v.vocabulary_size(), 2);
        assert!(v.vocabulary.contains_key("snow"));
        assert!(v.vocabulary.contains_key("red"));
        assert!(v.transform("fox bear").is_empty());
        assert!(v.transform("red snow").iter().all(|(idx, _)| *idx < 2));
    }

    #[test]
    fn empty_corpus_is_an_error() {
        assert!(TfidfVectorizer::fit(&[]).is_err());
    }

    #[test]
    fn stop_word_only_corpus_is_an_error() {
        assert!(TfidfVectorizer::fit(&["the and of".to_string()]).is_err());
    }
}
