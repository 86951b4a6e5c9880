//! Topical coherency across a story's sentences.

use fable_core::errors::FableResult;
use fable_core::traits::TextEmbedder;
use fable_embeddings::cosine_similarity;

/// Sum of cosine similarities between the first sentence and each later
/// sentence, in the retrieval embedding space.
pub fn coherency(sentences: &[String], embedder: &dyn TextEmbedder) -> FableResult<f64> {
    if sentences.len() < 2 {
        return Ok(0.0);
    }
    let vectors = embedder.transform(sentences)?;
    let Some((first, rest)) = vectors.split_first() else {
        return Ok(0.0);
    };
    Ok(rest.iter().map(|v| cosine_similarity(first, v)).sum())
}
