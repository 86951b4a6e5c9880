use serde::{Deserialize, Serialize};

/// One captioned image of the retrieval corpus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    pub image_id: String,
    /// Caption text the corpus embedding is fit on.
    #[serde(alias = "ai_description")]
    pub description: String,
}

/// A loaded, display-ready image. Pixel decoding is left to the
/// collaborators that consume it (style transforms, classifiers, the client).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAsset {
    pub image_id: String,
    /// Encoded image bytes (JPEG for the stock corpus).
    pub bytes: Vec<u8>,
    /// Style applied to `bytes`, `None` for the original.
    pub style: Option<String>,
}

impl ImageAsset {
    pub fn new(image_id: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            image_id: image_id.into(),
            bytes,
            style: None,
        }
    }
}
