//! # fable-generation
//!
//! Text generation on top of an opaque [`LanguageModel`](fable_core::traits::LanguageModel).
//!
//! - [`SequenceSampler`]: one batched sampling pass, left-padded, trimmed to
//!   the last sentence end.
//! - [`IterativeGenerator`]: grows seed prompts round by round, pruning to the
//!   best candidates between rounds, until the target length is reached.

pub mod iterative;
pub mod sampler;

pub use iterative::{GenerationOutcome, IterativeGenerator, StoryRequest};
pub use sampler::{SampleMode, SequenceSampler};
