use serde::{Deserialize, Serialize};

use super::ImageAsset;

/// Phases of a story session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoryPhase {
    #[default]
    Idle,
    GeneratingText,
    GeneratingImages,
    StyleTransfer,
    Ready,
}

/// Extracts and images already committed to the current story.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryState {
    /// Reading order.
    pub extracts: Vec<String>,
    /// Insertion order; the authority for duplicate suppression.
    pub image_ids: Vec<String>,
}

impl StoryState {
    pub fn clear(&mut self) {
        self.extracts.clear();
        self.image_ids.clear();
    }

    pub fn contains_image(&self, image_id: &str) -> bool {
        self.image_ids.iter().any(|id| id == image_id)
    }
}

/// The story returned to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedStory {
    pub extracts: Vec<String>,
    pub image_ids: Vec<String>,
    /// Resolved (and possibly styled) images, one per extract, aligned with
    /// `image_ids`.
    pub images: Vec<ImageAsset>,
}
