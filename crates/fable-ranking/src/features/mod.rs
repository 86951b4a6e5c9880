//! Individual quality features. Each is a pure function of the candidate
//! text and whatever resources it needs.

pub mod coherency;
pub mod divergence;
pub mod lexical;
pub mod readability;
pub mod sentiment;

pub use coherency::coherency;
pub use divergence::model_divergence;
pub use lexical::{diversity, filtered_words, simplicity};
pub use readability::{readability, ReadabilityStats};
pub use sentiment::sentiment_polarity;
