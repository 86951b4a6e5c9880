//! Deterministic tokenizer and language model.
//!
//! The tokenizer interns GPT-2 style pieces (leading space attached to the
//! following word) so `decode(encode(x)) == x`. The model appends words and
//! sentence marks from a small pool, varied per prompt and per returned
//! sequence.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use fable_core::errors::FableResult;
use fable_core::models::{PromptBatch, SamplingParams};
use fable_core::traits::{LanguageModel, Tokenizer};

pub const PAD_ID: u32 = 0;
const PAD_PIECE: &str = "<|pad|>";

/// Size of the mock vocabulary seen by `logits`.
pub const MOCK_VOCAB: usize = 16;

#[derive(Default)]
struct Vocab {
    ids: HashMap<String, u32>,
    pieces: Vec<String>,
}

/// Word-level tokenizer with on-the-fly interning. Id 0 is padding.
pub struct MockTokenizer {
    vocab: RwLock<Vocab>,
}

impl MockTokenizer {
    pub fn new() -> Self {
        let mut vocab = Vocab::default();
        vocab.ids.insert(PAD_PIECE.to_string(), PAD_ID);
        vocab.pieces.push(PAD_PIECE.to_string());
        Self {
            vocab: RwLock::new(vocab),
        }
    }

    /// Id of `piece`, interning it when new.
    pub fn intern(&self, piece: &str) -> u32 {
        if let Some(id) = self.vocab.read().unwrap().ids.get(piece) {
            return *id;
        }
        let mut vocab = self.vocab.write().unwrap();
        if let Some(id) = vocab.ids.get(piece) {
            return *id;
        }
        let id = vocab.pieces.len() as u32;
        vocab.ids.insert(piece.to_string(), id);
        vocab.pieces.push(piece.to_string());
        id
    }

    /// Split into pieces: an optional single leading space followed by a
    /// word, a `."` pair, or any other single character.
    pub fn pieces(text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        let mut out = Vec::new();
        let mut i = 0;
        while i < chars.len() {
            let mut piece = String::new();
            if chars[i] == ' ' && i + 1 < chars.len() && chars[i + 1] != ' ' {
                piece.push(' ');
                i += 1;
            }
            if chars[i].is_alphanumeric() {
                while i < chars.len() && chars[i].is_alphanumeric() {
                    piece.push(chars[i]);
                    i += 1;
                }
            } else if chars[i] == '.' && chars.get(i + 1) == Some(&'"') {
                piece.push_str(".\"");
                i += 2;
            } else {
                piece.push(chars[i]);
                i += 1;
            }
            out.push(piece);
        }
        out
    }
}

impl Default for MockTokenizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Tokenizer for MockTokenizer {
    fn encode(&self, text: &str) -> FableResult<Vec<u32>> {
        Ok(Self::pieces(text).iter().map(|p| self.intern(p)).collect())
    }

    fn decode(&self, ids: &[u32], skip_special_tokens: bool) -> FableResult<String> {
        let vocab = self.vocab.read().unwrap();
        let mut out = String::new();
        for &id in ids {
            if id == PAD_ID && skip_special_tokens {
                continue;
            }
            if let Some(piece) = vocab.pieces.get(id as usize) {
                out.push_str(piece);
            }
        }
        Ok(out)
    }

    fn pad_token_id(&self) -> u32 {
        PAD_ID
    }
}

const WORDS: [&str; 20] = [
    " the", " fox", " sun", " ran", " over", " bright", " hill", " and", " found", " a",
    " warm", " river", " bird", " sang", " softly", " golden", " light", " morning",
    " children", " played",
];

const MARKS: [&str; 3] = [".", ".", "!"];

/// Deterministic stand-in for a causal language model.
pub struct MockLanguageModel {
    name: String,
    tokenizer: Arc<MockTokenizer>,
    salt: u64,
    generate_calls: AtomicUsize,
}

impl MockLanguageModel {
    pub fn new(name: &str, tokenizer: Arc<MockTokenizer>, salt: u64) -> Self {
        Self {
            name: name.to_string(),
            tokenizer,
            salt,
            generate_calls: AtomicUsize::new(0),
        }
    }

    /// Fine-tuned and preset models sharing one tokenizer.
    pub fn pair(tokenizer: Arc<MockTokenizer>) -> (Self, Self) {
        (
            Self::new("mock-finetuned", tokenizer.clone(), 7),
            Self::new("mock-preset", tokenizer, 13),
        )
    }

    /// How many times `generate` has been called.
    pub fn generate_calls(&self) -> usize {
        self.generate_calls.load(Ordering::SeqCst)
    }

    fn continuation(&self, seed: u64, count: usize) -> Vec<u32> {
        let mut state = seed;
        let mut out = Vec::with_capacity(count);
        let mut since_mark = 0;
        for _ in 0..count {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let roll = (state >> 33) as usize;
            let piece = if since_mark >= 3 && (since_mark >= 6 || roll % 3 == 0) {
                since_mark = 0;
                MARKS[roll % MARKS.len()]
            } else {
                since_mark += 1;
                WORDS[roll % WORDS.len()]
            };
            out.push(self.tokenizer.intern(piece));
        }
        out
    }
}

impl LanguageModel for MockLanguageModel {
    fn generate(&self, batch: &PromptBatch, params: &SamplingParams) -> FableResult<Vec<Vec<u32>>> {
        let call = self.generate_calls.fetch_add(1, Ordering::SeqCst);
        let mut out = Vec::with_capacity(batch.len() * params.num_return_sequences);
        for row in &batch.input_ids {
            for r in 0..params.num_return_sequences {
                let mut hasher = DefaultHasher::new();
                row.hash(&mut hasher);
                (r, call, self.salt).hash(&mut hasher);
                let new_tokens = params.max_length.saturating_sub(row.len());
                let mut sequence = row.clone();
                sequence.extend(self.continuation(hasher.finish(), new_tokens));
                out.push(sequence);
            }
        }
        Ok(out)
    }

    fn logits(&self, input_ids: &[u32]) -> FableResult<Vec<Vec<f32>>> {
        Ok(input_ids
            .iter()
            .map(|&id| {
                (0..MOCK_VOCAB)
                    .map(|j| {
                        let v = (id as u64 * 31 + j as u64 * 17 + self.salt) % 13;
                        v as f32 / 4.0
                    })
                    .collect()
            })
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
