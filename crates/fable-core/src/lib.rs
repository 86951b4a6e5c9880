//! # fable-core
//!
//! Foundation crate for the Fable illustrated-story engine.
//! Defines all shared types, collaborator traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod spans;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::FableConfig;
pub use errors::{FableError, FableResult};
pub use models::{Feature, FeatureVector, ImageAsset, ImageRecord, ScoreMatrix};
