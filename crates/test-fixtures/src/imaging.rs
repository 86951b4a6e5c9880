//! Image collaborators: an in-memory store, a byte-histogram classifier,
//! and a tagging style transform.

use std::collections::HashSet;

use fable_core::errors::{FableResult, ImagingError, RetrievalError};
use fable_core::models::ImageAsset;
use fable_core::traits::{ImageClassifier, ImageStore, StyleTransform};

/// Serves every id as an asset whose bytes are the id itself.
#[derive(Debug, Default)]
pub struct MockImageStore {
    missing: HashSet<String>,
}

impl MockImageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `image_id` fail to load.
    pub fn without(mut self, image_id: &str) -> Self {
        self.missing.insert(image_id.to_string());
        self
    }
}

impl ImageStore for MockImageStore {
    fn load(&self, image_id: &str) -> FableResult<ImageAsset> {
        if self.missing.contains(image_id) {
            return Err(RetrievalError::ImageNotFound {
                image_id: image_id.to_string(),
            }
            .into());
        }
        Ok(ImageAsset::new(image_id, image_id.as_bytes().to_vec()))
    }
}

/// Logits are an 8-bucket histogram of the image bytes.
#[derive(Debug, Default)]
pub struct MockClassifier;

impl ImageClassifier for MockClassifier {
    fn logits(&self, image: &ImageAsset) -> FableResult<Vec<f32>> {
        if image.bytes.is_empty() {
            return Err(ImagingError::ClassifierFailed {
                image_id: image.image_id.clone(),
                reason: "empty image".to_string(),
            }
            .into());
        }
        let mut histogram = vec![0.0f32; 8];
        for b in &image.bytes {
            histogram[(*b % 8) as usize] += 1.0;
        }
        Ok(histogram)
    }
}

/// Appends `+<name>` to the bytes and records the style name.
#[derive(Debug)]
pub struct MockStyle {
    name: String,
}

impl MockStyle {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

impl StyleTransform for MockStyle {
    fn apply(&self, image: &ImageAsset) -> FableResult<ImageAsset> {
        let mut bytes = image.bytes.clone();
        bytes.extend_from_slice(format!("+{}", self.name).as_bytes());
        Ok(ImageAsset {
            image_id: image.image_id.clone(),
            bytes,
            style: Some(self.name.clone()),
        })
    }
}
