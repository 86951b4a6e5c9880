//! Property tests for the LSA embedding space.

use fable_core::traits::TextEmbedder;
use fable_embeddings::{cosine_similarity, LsaEmbedder};
use proptest::prelude::*;

const CAPTIONS: [&str; 6] = [
    "a red fox sitting in the snow",
    "a brown bear fishing in a river",
    "snow covered mountain peaks at dawn",
    "a red barn in a green field",
    "children playing near a castle",
    "an owl perched on a branch at night",
];

fn corpus() -> Vec<String> {
    CAPTIONS.iter().map(|s| s.to_string()).collect()
}

proptest! {
    #[test]
    fn every_query_has_the_fitted_dimensionality(query in "[a-z ]{0,60}", dims in 1usize..10) {
        let lsa = LsaEmbedder::fit(&corpus(), dims).unwrap();
        let out = lsa.transform(&[query]).unwrap();
        prop_assert_eq!(out[0].len(), lsa.dimensions());
        prop_assert!(lsa.dimensions() <= dims);
    }

    #[test]
    fn similarities_are_bounded(a in "[a-z ]{0,40}", b in "[a-z ]{0,40}") {
        let lsa = LsaEmbedder::fit(&corpus(), 500).unwrap();
        let out = lsa.transform(&[a, b]).unwrap();
        let sim = cosine_similarity(&out[0], &out[1]);
        prop_assert!(sim.is_finite());
        prop_assert!((-1.0..=1.0).contains(&sim));
    }

    #[test]
    fn transform_is_deterministic(query in "[a-z ]{0,60}") {
        let lsa = LsaEmbedder::fit(&corpus(), 4).unwrap();
        let first = lsa.transform(&[query.clone()]).unwrap();
        let second = lsa.transform(&[query]).unwrap();
        prop_assert_eq!(first, second);
    }
}
