//! # fable-embeddings
//!
//! The shared text/caption vector space used by image retrieval and the
//! coherency feature. [`LsaEmbedder`] is fit once from the caption corpus
//! (TF-IDF followed by truncated SVD) and only transforms afterwards.
//! [`CachedEmbedder`] memoizes query embeddings by content hash.

pub mod cache;
pub mod lsa;
pub mod similarity;
pub mod tfidf;

pub use cache::CachedEmbedder;
pub use lsa::LsaEmbedder;
pub use similarity::{cosine_similarity, rank_by_similarity};
pub use tfidf::{SparseVector, TfidfVectorizer};
