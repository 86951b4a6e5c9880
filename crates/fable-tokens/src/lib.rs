//! # fable-tokens
//!
//! GPT-2 tokenization via `tiktoken-rs` (`r50k_base`) and token counting
//! with a content-hash cache, used to measure story length between
//! generation rounds.

pub mod counter;
pub mod gpt2;

pub use counter::TokenCounter;
pub use gpt2::Gpt2Tokenizer;
