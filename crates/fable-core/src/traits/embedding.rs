use crate::errors::FableResult;

/// Maps text into the vector space the image corpus lives in.
///
/// Implementations are fit once at startup; `transform` never refits.
pub trait TextEmbedder: Send + Sync {
    /// Embed a batch of texts, one vector per text.
    fn transform(&self, texts: &[String]) -> FableResult<Vec<Vec<f32>>>;

    /// The dimensionality of produced vectors.
    fn dimensions(&self) -> usize;

    /// Human-readable embedder name.
    fn name(&self) -> &str;
}
