//! Test fixtures for Fable: deterministic stand-ins for the pretrained
//! collaborators plus loaders for the small data files under `data/`.
//!
//! Panics on missing or malformed fixture files; test-only crate.

pub mod imaging;
pub mod language;

use std::path::PathBuf;

use fable_core::ImageRecord;

pub use imaging::{MockClassifier, MockImageStore, MockStyle};
pub use language::{MockLanguageModel, MockTokenizer};

/// Root directory of the fixture data files.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Absolute path to a fixture file.
pub fn fixture_path(relative_path: &str) -> PathBuf {
    fixtures_root().join(relative_path)
}

/// Read a fixture file as text.
///
/// # Panics
/// Panics if the file doesn't exist.
pub fn load_fixture_text(relative_path: &str) -> String {
    let path = fixture_path(relative_path);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e))
}

/// The captioned image corpus in `data/captions.jsonl`.
pub fn sample_corpus() -> Vec<ImageRecord> {
    load_fixture_text("captions.jsonl")
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(|l| {
            serde_json::from_str(l).unwrap_or_else(|e| panic!("Bad caption line {l:?}: {e}"))
        })
        .collect()
}

/// Owned strings from literals.
pub fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
