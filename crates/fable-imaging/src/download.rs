//! Fetches corpus images into `<dir>/<image_id>.<extension>`.
//!
//! Runs on its own bounded rayon pool. Files already on disk are skipped,
//! so a partial run can simply be repeated. Per-image failures are
//! collected in the report and never abort the batch.

use std::path::{Path, PathBuf};
use std::time::Duration;

use rayon::prelude::*;
use tracing::{info, warn};

use fable_core::config::ImagingConfig;
use fable_core::errors::{FableError, FableResult, ImagingError};

/// Outcome of [`ImageDownloader::download_all`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DownloadReport {
    pub downloaded: usize,
    pub skipped: usize,
    /// `(image_id, reason)` per failed image, in request order.
    pub failed: Vec<(String, String)>,
}

pub struct ImageDownloader {
    client: reqwest::blocking::Client,
    pool: rayon::ThreadPool,
    url_template: String,
    extension: String,
}

impl ImageDownloader {
    pub fn new(config: &ImagingConfig) -> FableResult<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.download_timeout_secs))
            .build()
            .map_err(|e| FableError::ConfigError(format!("http client: {e}")))?;
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.download_threads)
            .thread_name(|i| format!("fable-download-{i}"))
            .build()
            .map_err(|e| ImagingError::PoolBuildFailed {
                reason: e.to_string(),
            })?;
        Ok(Self {
            client,
            pool,
            url_template: config.url_template.clone(),
            extension: config.image_extension.clone(),
        })
    }

    pub fn url_for(&self, image_id: &str) -> String {
        self.url_template.replace("{id}", image_id)
    }

    pub fn path_for(&self, dir: &Path, image_id: &str) -> PathBuf {
        dir.join(format!("{image_id}.{}", self.extension))
    }

    /// Download every id not yet present in `dir`.
    pub fn download_all(&self, image_ids: &[String], dir: &Path) -> FableResult<DownloadReport> {
        std::fs::create_dir_all(dir)?;
        let span = fable_core::imaging_span!("download", image_ids.len());
        let _guard = span.enter();

        let (present, missing): (Vec<&String>, Vec<&String>) = image_ids
            .iter()
            .partition(|id| self.path_for(dir, id).exists());

        let results: Vec<(&String, Result<(), ImagingError>)> = self.pool.install(|| {
            missing
                .par_iter()
                .map(|id| (*id, self.download_one(id, dir)))
                .collect()
        });

        let mut report = DownloadReport {
            skipped: present.len(),
            ..DownloadReport::default()
        };
        for (id, result) in results {
            match result {
                Ok(()) => report.downloaded += 1,
                Err(e) => {
                    warn!(image_id = %id, error = %e, "image download failed");
                    report.failed.push((id.clone(), e.to_string()));
                }
            }
        }

        info!(
            downloaded = report.downloaded,
            skipped = report.skipped,
            failed = report.failed.len(),
            dir = %dir.display(),
            "image download finished"
        );
        Ok(report)
    }

    fn download_one(&self, image_id: &str, dir: &Path) -> Result<(), ImagingError> {
        let failed = |reason: String| ImagingError::DownloadFailed {
            image_id: image_id.to_string(),
            reason,
        };

        let bytes = self
            .client
            .get(self.url_for(image_id))
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.bytes())
            .map_err(|e| failed(e.to_string()))?;

        // Rename last: a file at `target` is always complete.
        let target = self.path_for(dir, image_id);
        let partial = target.with_extension("part");
        std::fs::write(&partial, &bytes).map_err(|e| failed(e.to_string()))?;
        std::fs::rename(&partial, &target).map_err(|e| failed(e.to_string()))?;
        Ok(())
    }
}

impl std::fmt::Debug for ImageDownloader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageDownloader")
            .field("url_template", &self.url_template)
            .field("threads", &self.pool.current_num_threads())
            .finish()
    }
}
