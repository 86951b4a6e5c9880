//! Property tests for duplicate suppression.

use proptest::prelude::*;

use fable_retrieval::select_unused;

fn buffer_of(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("img-{i}")).collect()
}

proptest! {
    #[test]
    fn selection_never_reuses_an_image(
        n in 1usize..40,
        used_mask in prop::collection::vec(any::<bool>(), 40),
        num_images in 1usize..10,
    ) {
        let buffer = buffer_of(n);
        let prev: Vec<String> = buffer
            .iter()
            .zip(&used_mask)
            .filter(|(_, used)| **used)
            .map(|(id, _)| id.clone())
            .collect();

        let selected = select_unused(&buffer, &prev, num_images);

        prop_assert!(selected.len() <= num_images);
        prop_assert!(selected.iter().all(|id| !prev.contains(id)));

        let available = n - prev.len();
        prop_assert_eq!(selected.len(), num_images.min(available));
    }

    #[test]
    fn selection_keeps_buffer_order(
        n in 1usize..40,
        skip in 0usize..40,
        num_images in 1usize..10,
    ) {
        let buffer = buffer_of(n);
        let prev: Vec<String> = buffer.iter().take(skip).cloned().collect();
        let selected = select_unused(&buffer, &prev, num_images);

        let expected: Vec<String> = buffer
            .iter()
            .skip(skip)
            .take(num_images)
            .cloned()
            .collect();
        prop_assert_eq!(selected, expected);
    }
}
