//! Visual styles applied to story images.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{debug, warn};

use fable_core::config::StyleKind;
use fable_core::errors::{FableError, FableResult};
use fable_core::traits::StyleTransform;
use fable_core::ImageAsset;

/// The style a pipeline renders images in. Every variant except `None`
/// carries the transform that produces it.
#[derive(Clone, Default)]
pub enum ImageStyle {
    #[default]
    None,
    Comics(Arc<dyn StyleTransform>),
    Sketch(Arc<dyn StyleTransform>),
    Anime(Arc<dyn StyleTransform>),
}

impl ImageStyle {
    /// Style for `kind`. Any kind other than `None` needs a transform.
    pub fn from_kind(kind: StyleKind, transform: Option<Arc<dyn StyleTransform>>) -> FableResult<Self> {
        let style = match (kind, transform) {
            (StyleKind::None, _) => ImageStyle::None,
            (StyleKind::Comics, Some(t)) => ImageStyle::Comics(t),
            (StyleKind::Sketch, Some(t)) => ImageStyle::Sketch(t),
            (StyleKind::Anime, Some(t)) => ImageStyle::Anime(t),
            (kind, None) => {
                return Err(FableError::ConfigError(format!(
                    "style {} requires a style transform",
                    kind.as_str()
                )))
            }
        };
        Ok(style)
    }

    pub fn kind(&self) -> StyleKind {
        match self {
            ImageStyle::None => StyleKind::None,
            ImageStyle::Comics(_) => StyleKind::Comics,
            ImageStyle::Sketch(_) => StyleKind::Sketch,
            ImageStyle::Anime(_) => StyleKind::Anime,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().as_str()
    }

    pub fn is_none(&self) -> bool {
        matches!(self, ImageStyle::None)
    }

    fn transform(&self) -> Option<&Arc<dyn StyleTransform>> {
        match self {
            ImageStyle::None => None,
            ImageStyle::Comics(t) | ImageStyle::Sketch(t) | ImageStyle::Anime(t) => Some(t),
        }
    }

    /// Styled copy of `image`. The result is tagged with this style's name.
    pub fn apply(&self, image: &ImageAsset) -> FableResult<ImageAsset> {
        let Some(transform) = self.transform() else {
            return Ok(image.clone());
        };
        let mut styled = transform.apply(image)?;
        styled.image_id = image.image_id.clone();
        styled.style = Some(self.name().to_string());
        Ok(styled)
    }

    /// Style every image in parallel. An image whose transform fails is
    /// logged and kept unstyled.
    pub fn style_all(&self, images: &[ImageAsset]) -> Vec<ImageAsset> {
        if self.is_none() {
            return images.to_vec();
        }
        let span = fable_core::imaging_span!("style_transfer", images.len());
        let _guard = span.enter();

        let styled: Vec<ImageAsset> = images
            .par_iter()
            .map(|image| {
                self.apply(image).unwrap_or_else(|e| {
                    warn!(
                        image_id = %image.image_id,
                        style = self.name(),
                        error = %e,
                        "style transfer failed, keeping original"
                    );
                    image.clone()
                })
            })
            .collect();
        debug!(style = self.name(), images = styled.len(), "styled images");
        styled
    }
}

impl std::fmt::Debug for ImageStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ImageStyle").field(&self.name()).finish()
    }
}
