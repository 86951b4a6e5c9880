use fable_text::{split_to_extracts, split_to_sentences, split_words};
use proptest::prelude::*;

/// Story-like text: words, spaces, newlines, and sentence marks.
fn story_text() -> impl Strategy<Value = String> {
    "[A-Za-z ,\n.!?;\"]{0,160}"
}

fn words_of(texts: &[String]) -> Vec<String> {
    texts
        .iter()
        .flat_map(|t| t.split_whitespace().map(str::to_string).collect::<Vec<_>>())
        .collect()
}

proptest! {
    #[test]
    fn sentences_resplit_idempotently(text in story_text()) {
        prop_assume!(text.chars().any(|c| ".!?;\"".contains(c)));
        let first = split_to_sentences(&text);
        let second = split_to_sentences(&first.join(" "));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn extracts_have_exact_count(text in story_text(), n in 1usize..8) {
        prop_assert_eq!(split_to_extracts(&text, n).len(), n);
    }

    #[test]
    fn extracts_preserve_sentence_words(text in story_text(), n in 1usize..8) {
        let extracts = split_to_extracts(&text, n);
        let sentences = split_to_sentences(&text);
        prop_assert_eq!(words_of(&extracts), words_of(&sentences));
    }

    #[test]
    fn extracts_preserve_words_of_terminated_text(body in "[A-Za-z ]{1,40}( [A-Za-z ]{1,40}[.!?]){1,6}", n in 1usize..6) {
        let text = format!("{body}.");
        let extracts = split_to_extracts(&text, n);
        prop_assert_eq!(
            words_of(&extracts),
            text.split_whitespace().map(str::to_string).collect::<Vec<_>>()
        );
    }

    #[test]
    fn split_words_never_yields_empty_tokens(text in ".{0,120}") {
        prop_assert!(split_words(&text).iter().all(|w| !w.is_empty()));
    }

    #[test]
    fn split_words_preserves_non_space_characters(text in "[a-z ,.!\n]{0,80}") {
        let joined: String = split_words(&text).concat();
        let expected: String = text.chars().filter(|c| *c != ' ').collect();
        let got: String = joined.chars().filter(|c| *c != ' ').collect();
        prop_assert_eq!(got, expected);
    }
}
