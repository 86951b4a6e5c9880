mod feature;
mod generation;
mod image;
mod linguistics;
mod story;

pub use feature::{Feature, FeatureVector, ScoreMatrix};
pub use generation::{PromptBatch, SamplingParams};
pub use image::{ImageAsset, ImageRecord};
pub use linguistics::{PartOfSpeech, SentiScore};
pub use story::{GeneratedStory, StoryPhase, StoryState};
