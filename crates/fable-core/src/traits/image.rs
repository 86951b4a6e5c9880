use crate::errors::FableResult;
use crate::models::ImageAsset;

/// Resolves corpus image ids to loaded images.
pub trait ImageStore: Send + Sync {
    fn load(&self, image_id: &str) -> FableResult<ImageAsset>;
}

/// Opaque image-to-image style network.
pub trait StyleTransform: Send + Sync {
    fn apply(&self, image: &ImageAsset) -> FableResult<ImageAsset>;
}

/// Image classifier whose logits are compared between images of one story.
pub trait ImageClassifier: Send + Sync {
    fn logits(&self, image: &ImageAsset) -> FableResult<Vec<f32>>;
}
