//! Span definitions per long-running operation: generation, ranking,
//! retrieval, imaging, pipeline.
//!
//! Callers must depend on `tracing`.

/// Create a generation span.
#[macro_export]
macro_rules! generation_span {
    ($prompts:expr, $max_length:expr) => {
        tracing::info_span!("fable.generation", prompts = $prompts, max_length = $max_length)
    };
}

/// Create a ranking span.
#[macro_export]
macro_rules! ranking_span {
    ($candidates:expr) => {
        tracing::info_span!("fable.ranking", candidates = $candidates)
    };
}

/// Create a retrieval span.
#[macro_export]
macro_rules! retrieval_span {
    ($query:expr, $num_images:expr) => {
        tracing::info_span!("fable.retrieval", query = %$query, num_images = $num_images)
    };
}

/// Create an imaging span.
#[macro_export]
macro_rules! imaging_span {
    ($operation:expr, $images:expr) => {
        tracing::info_span!("fable.imaging", operation = %$operation, images = $images)
    };
}

/// Create a pipeline span.
#[macro_export]
macro_rules! pipeline_span {
    ($operation:expr, $session_id:expr) => {
        tracing::info_span!("fable.pipeline", operation = %$operation, session_id = %$session_id)
    };
}

