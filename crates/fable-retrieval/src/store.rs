//! Directory-backed image store: `<dir>/<image_id>.<extension>`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use fable_core::errors::{FableError, FableResult, RetrievalError};
use fable_core::traits::ImageStore;
use fable_core::ImageAsset;

#[derive(Debug, Clone)]
pub struct FsImageStore {
    dir: PathBuf,
    extension: String,
}

impl FsImageStore {
    pub fn new(dir: impl Into<PathBuf>, extension: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            extension: extension.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Where `image_id` is (or would be) stored.
    pub fn path_for(&self, image_id: &str) -> PathBuf {
        self.dir.join(format!("{image_id}.{}", self.extension))
    }
}

impl ImageStore for FsImageStore {
    fn load(&self, image_id: &str) -> FableResult<ImageAsset> {
        match std::fs::read(self.path_for(image_id)) {
            Ok(bytes) => Ok(ImageAsset::new(image_id, bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(RetrievalError::ImageNotFound {
                image_id: image_id.to_string(),
            }
            .into()),
            Err(e) => Err(FableError::Io(e)),
        }
    }
}
