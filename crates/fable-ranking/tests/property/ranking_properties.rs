//! Property tests for rank aggregation.

use fable_core::ScoreMatrix;
use fable_ranking::{normalize_columns, sort_scores};
use proptest::prelude::*;

fn matrix_strategy() -> impl Strategy<Value = Vec<Vec<f64>>> {
    (1usize..6, 1usize..12).prop_flat_map(|(width, rows)| {
        prop::collection::vec(prop::collection::vec(-100.0f64..100.0, width), rows)
    })
}

proptest! {
    #[test]
    fn normalized_values_are_finite_and_bounded(rows in matrix_strategy()) {
        let m = ScoreMatrix::new(rows).unwrap();
        for row in normalize_columns(&m) {
            for v in row {
                prop_assert!(v.is_finite());
                prop_assert!((0.0..=1.0).contains(&v));
            }
        }
    }

    #[test]
    fn constant_column_normalizes_to_exact_zero(
        rows in matrix_strategy(),
        constant in -50.0f64..50.0,
    ) {
        let rows: Vec<Vec<f64>> = rows
            .into_iter()
            .map(|mut r| { r[0] = constant; r })
            .collect();
        let m = ScoreMatrix::new(rows).unwrap();
        for row in normalize_columns(&m) {
            prop_assert_eq!(row[0], 0.0);
        }
    }

    #[test]
    fn result_is_a_permutation(rows in matrix_strategy()) {
        let n = rows.len();
        let m = ScoreMatrix::new(rows).unwrap();
        let mut order = sort_scores(&m);
        order.sort_unstable();
        prop_assert_eq!(order, (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn order_follows_content_not_position(rows in matrix_strategy(), rotate in 0usize..12) {
        let n = rows.len();
        let shift = rotate % n;
        let mut rotated = rows.clone();
        rotated.rotate_left(shift);

        let original = sort_scores(&ScoreMatrix::new(rows.clone()).unwrap());
        let permuted = sort_scores(&ScoreMatrix::new(rotated.clone()).unwrap());

        let a: Vec<&Vec<f64>> = original.iter().map(|&i| &rows[i]).collect();
        let b: Vec<&Vec<f64>> = permuted.iter().map(|&i| &rotated[i]).collect();

        // Rows with distinct aggregate scores land in the same order; only
        // exact duplicates may swap, and duplicates are equal anyway.
        let distinct = {
            let mut seen: Vec<&Vec<f64>> = Vec::new();
            rows.iter().all(|r| {
                let dup = seen.contains(&r);
                seen.push(r);
                !dup
            })
        };
        prop_assume!(distinct);
        let normalized = normalize_columns(&ScoreMatrix::new(rows.clone()).unwrap());
        let mut means: Vec<f64> = normalized
            .iter()
            .map(|r| r.iter().sum::<f64>() / r.len() as f64)
            .collect();
        means.sort_by(|x, y| x.partial_cmp(y).unwrap());
        prop_assume!(means.windows(2).all(|w| w[0] != w[1]));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn ties_keep_input_order(row in prop::collection::vec(-10.0f64..10.0, 1..5), copies in 2usize..6) {
        let m = ScoreMatrix::new(vec![row; copies]).unwrap();
        prop_assert_eq!(sort_scores(&m), (0..copies).collect::<Vec<_>>());
    }
}
