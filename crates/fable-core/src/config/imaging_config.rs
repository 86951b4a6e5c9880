use serde::{Deserialize, Serialize};

use super::defaults;

/// Visual style applied to retrieved images.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleKind {
    #[default]
    None,
    Comics,
    Sketch,
    Anime,
}

impl StyleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StyleKind::None => "none",
            StyleKind::Comics => "comics",
            StyleKind::Sketch => "sketch",
            StyleKind::Anime => "anime",
        }
    }
}

/// Image download and styling configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImagingConfig {
    pub style: StyleKind,
    /// Worker threads for download and style-transfer fan-out.
    pub download_threads: usize,
    /// Source URL; `{id}` is replaced with the image id.
    pub url_template: String,
    pub download_timeout_secs: u64,
    pub image_extension: String,
}

impl Default for ImagingConfig {
    fn default() -> Self {
        Self {
            style: StyleKind::None,
            download_threads: defaults::DEFAULT_DOWNLOAD_THREADS,
            url_template: defaults::DEFAULT_DOWNLOAD_URL_TEMPLATE.to_string(),
            download_timeout_secs: defaults::DEFAULT_DOWNLOAD_TIMEOUT_SECS,
            image_extension: defaults::DEFAULT_IMAGE_EXTENSION.to_string(),
        }
    }
}
