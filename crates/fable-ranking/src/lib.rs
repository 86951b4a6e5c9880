//! # fable-ranking
//!
//! Scores candidate stories on heterogeneous quality features and turns the
//! resulting score matrix into a total order.
//!
//! Features live in [`features`]; [`FeatureScorer`] assembles them into a
//! [`FeatureVector`](fable_core::FeatureVector) per candidate; [`aggregator`]
//! min-max normalizes each feature column and sorts by the row mean.

pub mod aggregator;
pub mod features;
pub mod scorer;

pub use aggregator::{normalize_columns, sort_scores};
pub use scorer::{FeatureScorer, ScoringModels};
