//! Model divergence: how far the fine-tuned model's next-token
//! distribution sits from the preset model's on the same text.

use fable_core::errors::{FableResult, RankingError};
use fable_core::traits::{LanguageModel, Tokenizer};

/// KL divergence `KL(finetuned || preset)` summed over vocabulary and
/// positions, averaged over the batch of one sequence. Texts shorter than
/// `min_chars` score 0.
pub fn model_divergence(
    text: &str,
    tokenizer: &dyn Tokenizer,
    preset: &dyn LanguageModel,
    finetuned: &dyn LanguageModel,
    min_chars: usize,
) -> FableResult<f64> {
    if text.chars().count() < min_chars {
        return Ok(0.0);
    }
    let ids = tokenizer.encode(text)?;
    if ids.is_empty() {
        return Ok(0.0);
    }

    let preset_logits = preset.logits(&ids)?;
    let finetuned_logits = finetuned.logits(&ids)?;
    kl_divergence_batchmean(&preset_logits, &finetuned_logits)
}

/// `Σ_positions Σ_vocab q · (ln q − log_softmax(p))` with `q = softmax(finetuned)`.
/// Terms with `q == 0` contribute 0.
pub fn kl_divergence_batchmean(preset: &[Vec<f32>], finetuned: &[Vec<f32>]) -> FableResult<f64> {
    if preset.len() != finetuned.len() {
        return Err(RankingError::LogitShapeMismatch {
            preset: preset.len(),
            finetuned: finetuned.len(),
        }
        .into());
    }

    let mut total = 0.0;
    for (p_row, q_row) in preset.iter().zip(finetuned) {
        if p_row.len() != q_row.len() {
            return Err(RankingError::LogitShapeMismatch {
                preset: p_row.len(),
                finetuned: q_row.len(),
            }
            .into());
        }
        let log_p = log_softmax(p_row);
        let log_q = log_softmax(q_row);
        for (lp, lq) in log_p.iter().zip(&log_q) {
            let q = lq.exp();
            if q > 0.0 {
                total += q * (lq - lp);
            }
        }
    }
    Ok(total)
}

fn log_softmax(logits: &[f32]) -> Vec<f64> {
    let max = logits
        .iter()
        .copied()
        .fold(f32::NEG_INFINITY, f32::max) as f64;
    let log_sum = logits
        .iter()
        .map(|&x| (x as f64 - max).exp())
        .sum::<f64>()
        .ln()
        + max;
    logits.iter().map(|&x| x as f64 - log_sum).collect()
}
