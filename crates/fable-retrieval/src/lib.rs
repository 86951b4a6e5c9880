//! # fable-retrieval
//!
//! Finds corpus images for story text. The caption corpus is embedded once
//! into a [`CorpusIndex`]; [`ImageRetriever`] embeds each extract's salient
//! terms into the same space, ranks captions by cosine similarity and skips
//! images the story already uses.

pub mod corpus;
pub mod index;
pub mod retriever;
pub mod store;

pub use corpus::ImageCorpus;
pub use index::CorpusIndex;
pub use retriever::{select_unused, ImageRetriever, StoryImages};
pub use store::FsImageStore;
