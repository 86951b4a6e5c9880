//! SentiWordNet 3.0 reader.
//!
//! Line format (tab-separated, `#` comments):
//! `POS  ID  PosScore  NegScore  SynsetTerms  Gloss`, where SynsetTerms is a
//! space-separated list of `lemma#sense`.

use std::collections::HashMap;
use std::path::Path;

use fable_core::errors::{FableResult, RankingError};
use fable_core::models::{PartOfSpeech, SentiScore};
use fable_core::traits::SentimentLexicon;
use tracing::info;

use crate::lemmatizer;

/// Sense-indexed sentiment lexicon.
#[derive(Debug, Clone, Default)]
pub struct SentiWordNet {
    /// (pos, lemma) → senses as (sense number, score), unsorted.
    senses: HashMap<(PartOfSpeech, String), Vec<(u32, SentiScore)>>,
}

impl SentiWordNet {
    pub fn load(path: impl AsRef<Path>) -> FableResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| RankingError::LexiconLoadFailed {
            reason: format!("{}: {e}", path.display()),
        })?;
        let lexicon = Self::parse(&content)?;
        info!(
            path = %path.display(),
            entries = lexicon.senses.len(),
            "loaded SentiWordNet lexicon"
        );
        Ok(lexicon)
    }

    pub fn parse(content: &str) -> FableResult<Self> {
        let mut senses: HashMap<(PartOfSpeech, String), Vec<(u32, SentiScore)>> = HashMap::new();

        for (line_no, line) in content.lines().enumerate() {
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let cols: Vec<&str> = line.split('\t').collect();
            if cols.len() < 5 {
                return Err(RankingError::LexiconLoadFailed {
                    reason: format!("line {}: expected 5+ columns, got {}", line_no + 1, cols.len()),
                }
                .into());
            }
            let Some(pos) = parse_pos(cols[0]) else {
                continue;
            };
            let score = SentiScore {
                positive: parse_score(cols[2], line_no)?,
                negative: parse_score(cols[3], line_no)?,
            };
            for term in cols[4].split_whitespace() {
                let Some((lemma, sense)) = term.rsplit_once('#') else {
                    continue;
                };
                let Ok(sense) = sense.parse::<u32>() else {
                    continue;
                };
                senses
                    .entry((pos, lemma.to_lowercase()))
                    .or_default()
                    .push((sense, score));
            }
        }

        Ok(Self { senses })
    }

    /// Insert one sense. Used to build small lexicons in code.
    pub fn insert(&mut self, pos: PartOfSpeech, lemma: &str, sense: u32, score: SentiScore) {
        self.senses
            .entry((pos, lemma.to_lowercase()))
            .or_default()
            .push((sense, score));
    }

    pub fn contains(&self, lemma: &str, pos: PartOfSpeech) -> bool {
        self.senses.contains_key(&(pos, lemma.to_string()))
    }

    /// Number of senses of `lemma` as `pos`.
    pub fn sense_count(&self, lemma: &str, pos: PartOfSpeech) -> usize {
        self.senses
            .get(&(pos, lemma.to_string()))
            .map(Vec::len)
            .unwrap_or(0)
    }

    pub fn len(&self) -> usize {
        self.senses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.senses.is_empty()
    }
}

impl SentimentLexicon for SentiWordNet {
    fn lemmatize(&self, word: &str, pos: PartOfSpeech) -> Option<String> {
        let word = word.to_lowercase();
        lemmatizer::lemmatize(&word, pos, |candidate| self.contains(candidate, pos))
    }

    fn most_common_sense(&self, lemma: &str, pos: PartOfSpeech) -> Option<SentiScore> {
        self.senses
            .get(&(pos, lemma.to_string()))?
            .iter()
            .min_by_key(|(sense, _)| *sense)
            .map(|(_, score)| *score)
    }
}

fn parse_pos(tag: &str) -> Option<PartOfSpeech> {
    match tag {
        "a" | "s" => Some(PartOfSpeech::Adjective),
        "n" => Some(PartOfSpeech::Noun),
        "r" => Some(PartOfSpeech::Adverb),
        "v" => Some(PartOfSpeech::Verb),
        _ => None,
    }
}

fn parse_score(raw: &str, line_no: usize) -> FableResult<f64> {
    raw.trim().parse::<f64>().map_err(|e| {
        RankingError::LexiconLoadFailed {
            reason: format!("line {}: bad score {raw:?}: {e}", line_no + 1),
        }
        .into()
    })
}
