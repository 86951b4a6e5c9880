//! # fable-lexicon
//!
//! Linguistic resources behind the sentiment feature and noun filtering:
//! a SentiWordNet 3.0 reader, WordNet-style morphological lemmatization,
//! and a tagger that picks each word's dominant part of speech from the
//! lexicon's sense inventory.

pub mod lemmatizer;
pub mod sentiwordnet;
pub mod tagger;

pub use sentiwordnet::SentiWordNet;
pub use tagger::LexiconTagger;
