use std::sync::Arc;

use fable_core::traits::Tokenizer;
use fable_tokens::{Gpt2Tokenizer, TokenCounter};
use proptest::prelude::*;

fn counter() -> TokenCounter {
    TokenCounter::new(Arc::new(Gpt2Tokenizer::new().unwrap()), 1_000)
}

proptest! {
    #[test]
    fn cached_equals_uncached(s in ".{0,200}") {
        let counter = counter();
        let uncached = counter.count(&s).unwrap();
        let cached = counter.count_cached(&s).unwrap();
        prop_assert_eq!(uncached, cached);
        prop_assert_eq!(counter.count_cached(&s).unwrap(), uncached);
    }

    #[test]
    fn subadditivity(a in "[a-zA-Z .,!?]{0,100}", b in "[a-zA-Z .,!?]{0,100}") {
        let counter = counter();
        let combined = format!("{}{}", a, b);
        let count_a = counter.count(&a).unwrap();
        let count_b = counter.count(&b).unwrap();
        let count_combined = counter.count(&combined).unwrap();
        prop_assert!(
            count_combined <= count_a + count_b + 1,
            "subadditivity: {} <= {} + {} + 1",
            count_combined, count_a, count_b
        );
    }

    #[test]
    fn ascii_round_trips(s in "[a-zA-Z0-9 .,;!?\n]{0,120}") {
        let tok = Gpt2Tokenizer::new().unwrap();
        let ids = tok.encode(&s).unwrap();
        prop_assert_eq!(tok.decode(&ids, true).unwrap(), s);
    }

    #[test]
    fn mean_never_exceeds_max(texts in proptest::collection::vec("[a-z ]{0,40}", 1..6)) {
        let counter = counter();
        let (mean, max) = counter.length_stats(&texts).unwrap();
        prop_assert!(mean <= max);
    }
}
