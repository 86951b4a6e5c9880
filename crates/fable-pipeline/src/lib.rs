//! # fable-pipeline
//!
//! The entry point of the engine. [`StoryPipeline`] is built once with its
//! models and corpus index, then serves story generation, autocomplete and
//! image retrieval for any number of sessions. Each session's story state
//! sits behind its own lock in the [`SessionManager`].

pub mod builder;
pub mod pipeline;
pub mod session;
pub mod tracing_setup;

pub use builder::StoryPipelineBuilder;
pub use pipeline::StoryPipeline;
pub use session::{SessionManager, StorySession};
