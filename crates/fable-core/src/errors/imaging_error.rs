/// Image processing errors. Raised per image; batch operations capture them.
#[derive(Debug, thiserror::Error)]
pub enum ImagingError {
    #[error("download failed for {image_id}: {reason}")]
    DownloadFailed { image_id: String, reason: String },

    #[error("style transform {style} failed: {reason}")]
    StyleTransferFailed { style: String, reason: String },

    #[error("classifier failed for {image_id}: {reason}")]
    ClassifierFailed { image_id: String, reason: String },

    #[error("worker pool build failed: {reason}")]
    PoolBuildFailed { reason: String },
}
