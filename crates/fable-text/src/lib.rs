//! # fable-text
//!
//! Plain-text utilities shared by ranking, retrieval, and the pipeline:
//! sentence and extract splitting, word splitting for statistics, stop-word
//! and frequent-word sets, and salient-term extraction for image queries.

pub mod normalize;
pub mod splitter;
pub mod terms;
pub mod wordlists;

pub use normalize::{collapse_whitespace, strip_title_line};
pub use splitter::{split_to_extracts, split_to_sentences, split_words};
pub use terms::TermExtractor;
pub use wordlists::{FrequentWords, StopWords};
