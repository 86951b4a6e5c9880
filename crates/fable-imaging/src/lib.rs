//! # fable-imaging
//!
//! Everything done to images after retrieval: optional style transfer,
//! ordering illustrated stories by how visually coherent their images are,
//! and fetching the corpus images to disk.

pub mod coherence;
#[cfg(feature = "download")]
pub mod download;
pub mod style;

pub use coherence::{image_coherence, rank_by_coherence};
#[cfg(feature = "download")]
pub use download::{DownloadReport, ImageDownloader};
pub use style::ImageStyle;
