//! WordNet "morphy" detachment rules.

use fable_core::models::PartOfSpeech;

/// `(suffix, replacement)` rules per part of speech.
pub fn detachment_rules(pos: PartOfSpeech) -> &'static [(&'static str, &'static str)] {
    match pos {
        PartOfSpeech::Noun => &[
            ("s", ""),
            ("ses", "s"),
            ("xes", "x"),
            ("zes", "z"),
            ("ches", "ch"),
            ("shes", "sh"),
            ("men", "man"),
            ("ies", "y"),
        ],
        PartOfSpeech::Verb => &[
            ("s", ""),
            ("ies", "y"),
            ("es", "e"),
            ("es", ""),
            ("ed", "e"),
            ("ed", ""),
            ("ing", "e"),
            ("ing", ""),
        ],
        PartOfSpeech::Adjective => &[("er", ""), ("est", ""), ("er", "e"), ("est", "e")],
        PartOfSpeech::Adverb => &[],
    }
}

/// Candidate base forms of `word`: the word itself, then every rule
/// application, in rule order. Duplicates are removed.
pub fn candidates(word: &str, pos: PartOfSpeech) -> Vec<String> {
    let mut out = vec![word.to_string()];
    for (suffix, replacement) in detachment_rules(pos) {
        if let Some(stem) = word.strip_suffix(suffix) {
            if stem.is_empty() {
                continue;
            }
            let candidate = format!("{stem}{replacement}");
            if !out.contains(&candidate) {
                out.push(candidate);
            }
        }
    }
    out
}

/// Shortest candidate accepted by `is_known` (first on ties).
pub fn lemmatize(word: &str, pos: PartOfSpeech, is_known: impl Fn(&str) -> bool) -> Option<String> {
    candidates(word, pos)
        .into_iter()
        .filter(|c| is_known(c))
        .min_by_key(|c| c.chars().count())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noun_plural_rules() {
        assert!(candidates("foxes", PartOfSpeech::Noun).contains(&"fox".to_string()));
        assert!(candidates("stories", PartOfSpeech::Noun).contains(&"story".to_string()));
        assert!(candidates("women", PartOfSpeech::Noun).contains(&"woman".to_string()));
    }

    #[test]
    fn verb_rules() {
        let c = candidates("danced", PartOfSpeech::Verb);
        assert!(c.contains(&"dance".to_string()));
        assert!(c.contains(&"danc".to_string()));
    }

    #[test]
    fn picks_shortest_known() {
        let known = ["fox", "foxe"];
        let lemma = lemmatize("foxes", PartOfSpeech::Noun, |w| known.contains(&w));
        assert_eq!(lemma.as_deref(), Some("fox"));
    }

    #[test]
    fn unknown_word_has_no_lemma() {
        assert_eq!(lemmatize("zzz", PartOfSpeech::Adverb, |_| false), None);
    }
}
