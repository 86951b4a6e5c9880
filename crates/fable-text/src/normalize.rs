//! Whitespace and title normalization for story payloads.

use fable_core::constants::TITLE_SEPARATOR;

/// Collapse every run of whitespace (spaces, tabs, newlines) to one space
/// and trim the ends.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Drop everything up to and including the first newline, i.e. the title
/// line a story was seeded with. Text without a newline is returned as is.
pub fn strip_title_line(text: &str) -> &str {
    match text.find(TITLE_SEPARATOR) {
        Some(idx) => &text[idx + TITLE_SEPARATOR.len_utf8()..],
        None => text,
    }
}
