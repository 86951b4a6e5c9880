mod embedding;
mod image;
mod language_model;
mod linguistics;

pub use embedding::TextEmbedder;
pub use image::{ImageClassifier, ImageStore, StyleTransform};
pub use language_model::{LanguageModel, Tokenizer};
pub use linguistics::{PosTagger, SentimentLexicon};
