//! Sentence, extract, and word splitting.

/// Characters that end a sentence. Runs of them are kept together.
const TERMINALS: [char; 5] = ['.', '!', '?', ';', '"'];

/// A terminal run directly after one of these is not a sentence end.
const ABBREVIATIONS: [&str; 2] = ["Mr", "Mrs"];

/// Sentence fragments after the last cut shorter than this are dropped.
const MIN_TRAILING_FRAGMENT_CHARS: usize = 3;

/// Sentence-terminal punctuation.
pub fn is_terminal(c: char) -> bool {
    TERMINALS.contains(&c)
}

fn follows_abbreviation(chars: &[char], pos: usize) -> bool {
    ABBREVIATIONS.iter().any(|abbr| {
        let n = abbr.chars().count();
        pos >= n && chars[pos - n..pos].iter().copied().eq(abbr.chars())
    })
}

/// Split `text` into trimmed sentences, cutting after every run of
/// `. ! ? ; "` unless the run starts right after "Mr" or "Mrs".
///
/// A trailing fragment shorter than 3 characters is dropped when there is
/// more than one sentence. Empty input yields a single empty sentence.
pub fn split_to_sentences(text: &str) -> Vec<String> {
    let chars: Vec<char> = text.trim().chars().collect();
    let mut sentences = Vec::new();
    let mut start = 0;
    let mut i = 0;

    while i < chars.len() {
        if is_terminal(chars[i]) && !follows_abbreviation(&chars, i) {
            let mut end = i;
            while end < chars.len() && is_terminal(chars[end]) {
                end += 1;
            }
            sentences.push(chars[start..end].iter().collect::<String>().trim().to_string());
            start = end;
            i = end;
        } else {
            i += 1;
        }
    }
    sentences.push(chars[start..].iter().collect::<String>().trim().to_string());

    if sentences.len() > 1
        && sentences
            .last()
            .is_some_and(|s| s.chars().count() < MIN_TRAILING_FRAGMENT_CHARS)
    {
        sentences.pop();
    }
    sentences
}

/// Split `text` into exactly `num_extracts` groups of consecutive sentences.
///
/// Groups are as equal as possible; the first `len % n` groups get one extra
/// sentence. Sentences inside a group are joined by a single space. When
/// there are fewer sentences than groups the tail groups are empty.
pub fn split_to_extracts(text: &str, num_extracts: usize) -> Vec<String> {
    if num_extracts == 0 {
        return Vec::new();
    }
    let sentences = split_to_sentences(text);
    let base = sentences.len() / num_extracts;
    let extra = sentences.len() % num_extracts;

    let mut extracts = Vec::with_capacity(num_extracts);
    let mut offset = 0;
    for group in 0..num_extracts {
        let size = base + usize::from(group < extra);
        extracts.push(sentences[offset..offset + size].join(" "));
        offset += size;
    }
    extracts
}

/// Split on single spaces that precede a word character.
///
/// Punctuation stays attached to its token ("Hello," "world!"), and
/// newlines do not split. Used for letter and word statistics, not model
/// tokenization. Empty tokens are dropped.
pub fn split_words(text: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        let splits = c == ' ' && chars.peek().is_some_and(|next| is_word_char(*next));
        if splits {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
        } else {
            current.push(c);
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_terminal_marks() {
        let s = split_to_sentences("The fox ran. The owl slept! Did it rain? Yes; it did.");
        assert_eq!(
            s,
            vec!["The fox ran.", "The owl slept!", "Did it rain?", "Yes;", "it did."]
        );
    }

    #[test]
    fn keeps_runs_of_marks_together() {
        let s = split_to_sentences("Wait... What?! \"Go.\" Then home.");
        assert_eq!(s, vec!["Wait...", "What?!", "\"", "Go.\"", "Then home."]);
    }

    #[test]
    fn does_not_split_after_honorifics() {
        let s = split_to_sentences("Mr. Fox met Mrs. Owl. They talked.");
        assert_eq!(s, vec!["Mr. Fox met Mrs. Owl.", "They talked."]);
    }

    #[test]
    fn drops_short_trailing_fragment() {
        assert_eq!(split_to_sentences("It ended. ab"), vec!["It ended."]);
        assert_eq!(
            split_to_sentences("It ended. abc"),
            vec!["It ended.", "abc"]
        );
    }

    #[test]
    fn single_fragment_is_kept() {
        assert_eq!(split_to_sentences("ab"), vec!["ab"]);
        assert_eq!(split_to_sentences("   "), vec![""]);
    }

    #[test]
    fn trims_title_newlines() {
        let s = split_to_sentences("The Wonders of the Sun\n\nThe sun rose. It was warm.");
        assert_eq!(
            s,
            vec!["The Wonders of the Sun\n\nThe sun rose.", "It was warm."]
        );
    }

    #[test]
    fn extracts_are_balanced_front_loaded() {
        let text = "One. Two. Three. Four. Five.";
        assert_eq!(
            split_to_extracts(text, 3),
            vec!["One. Two.", "Three. Four.", "Five."]
        );
    }

    #[test]
    fn extracts_pad_with_empty_groups() {
        assert_eq!(split_to_extracts("Only one.", 3), vec!["Only one.", "", ""]);
    }

    #[test]
    fn zero_extracts_is_empty() {
        assert!(split_to_extracts("One. Two.", 0).is_empty());
    }

    #[test]
    fn words_keep_attached_punctuation() {
        assert_eq!(
            split_words("Hello, world! \"Quoted\" end"),
            vec!["Hello,", "world! \"Quoted\"", "end"]
        );
    }

    #[test]
    fn words_do_not_split_on_newlines() {
        assert_eq!(split_words("a\nb c"), vec!["a\nb", "c"]);
    }

    #[test]
    fn empty_text_has_no_words() {
        assert!(split_words("").is_empty());
    }
}
