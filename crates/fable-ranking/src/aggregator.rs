//! Min-max rank aggregation.

use fable_core::ScoreMatrix;

/// Min-max normalize every column to `[0, 1]`. Zero-range columns become
/// all zeros.
pub fn normalize_columns(matrix: &ScoreMatrix) -> Vec<Vec<f64>> {
    let width = matrix.num_features();
    let mut mins = vec![f64::INFINITY; width];
    let mut maxs = vec![f64::NEG_INFINITY; width];
    for row in matrix.rows() {
        for (j, &v) in row.iter().enumerate() {
            mins[j] = mins[j].min(v);
            maxs[j] = maxs[j].max(v);
        }
    }

    matrix
        .rows()
        .iter()
        .map(|row| {
            row.iter()
                .enumerate()
                .map(|(j, &v)| {
                    let range = maxs[j] - mins[j];
                    if range > 0.0 {
                        (v - mins[j]) / range
                    } else {
                        0.0
                    }
                })
                .collect()
        })
        .collect()
}

/// Row indices ordered by descending mean normalized score. Ties keep their
/// original order.
pub fn sort_scores(matrix: &ScoreMatrix) -> Vec<usize> {
    let width = matrix.num_features();
    let means: Vec<f64> = normalize_columns(matrix)
        .iter()
        .map(|row| {
            if width == 0 {
                0.0
            } else {
                row.iter().sum::<f64>() / width as f64
            }
        })
        .collect();

    let mut order: Vec<usize> = (0..means.len()).collect();
    order.sort_by(|&a, &b| {
        means[b]
            .partial_cmp(&means[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    order
}
