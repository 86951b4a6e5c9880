//! Visual coherence of a story's images.
//!
//! Each image is summarized by the softmax of its classifier logits. A
//! story's coherence is the mean KL divergence between consecutive images;
//! lower means the pictures drift less from one to the next.

use rayon::prelude::*;
use tracing::debug;

use fable_core::errors::{FableResult, ImagingError};
use fable_core::traits::ImageClassifier;
use fable_core::ImageAsset;

pub fn softmax(logits: &[f32]) -> Vec<f64> {
    let max = logits.iter().copied().fold(f32::NEG_INFINITY, f32::max) as f64;
    let exps: Vec<f64> = logits.iter().map(|&l| (l as f64 - max).exp()).collect();
    let sum: f64 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}

/// `KL(p || q)`. Terms where `p` is zero contribute nothing.
pub fn kl_divergence(p: &[f64], q: &[f64]) -> f64 {
    p.iter()
        .zip(q)
        .filter(|(pi, _)| **pi > 0.0)
        .map(|(pi, qi)| pi * (pi / qi.max(f64::MIN_POSITIVE)).ln())
        .sum()
}

/// Mean divergence between consecutive images. Fewer than two images
/// score 0.
pub fn image_coherence(classifier: &dyn ImageClassifier, images: &[ImageAsset]) -> FableResult<f64> {
    if images.len() < 2 {
        return Ok(0.0);
    }

    let mut distributions = Vec::with_capacity(images.len());
    for image in images {
        let logits = classifier.logits(image)?;
        if logits.is_empty() {
            return Err(ImagingError::ClassifierFailed {
                image_id: image.image_id.clone(),
                reason: "classifier returned no logits".to_string(),
            }
            .into());
        }
        distributions.push(softmax(&logits));
    }

    let width = distributions[0].len();
    if let Some((i, _)) = distributions.iter().enumerate().find(|(_, d)| d.len() != width) {
        return Err(ImagingError::ClassifierFailed {
            image_id: images[i].image_id.clone(),
            reason: format!("expected {width} logits, got {}", distributions[i].len()),
        }
        .into());
    }

    let total: f64 = distributions
        .windows(2)
        .map(|pair| kl_divergence(&pair[0], &pair[1]))
        .sum();
    Ok(total / (distributions.len() - 1) as f64)
}

/// Story indices, most coherent first. Ties keep input order.
pub fn rank_by_coherence(
    classifier: &dyn ImageClassifier,
    stories: &[Vec<ImageAsset>],
) -> FableResult<Vec<usize>> {
    let span = fable_core::imaging_span!("coherence", stories.len());
    let _guard = span.enter();

    let scores = stories
        .par_iter()
        .map(|images| image_coherence(classifier, images))
        .collect::<FableResult<Vec<f64>>>()?;

    let mut order: Vec<usize> = (0..stories.len()).collect();
    order.sort_by(|&a, &b| scores[a].total_cmp(&scores[b]));
    debug!(stories = stories.len(), best = ?order.first(), "ranked stories by image coherence");
    Ok(order)
}
