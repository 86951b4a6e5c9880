use std::sync::Arc;

use fable_core::constants::REPLACEMENT_CHAR;
use fable_core::errors::{FableError, FableResult};
use fable_core::traits::Tokenizer;
use tiktoken_rs::CoreBPE;

/// GPT-2's `<|endoftext|>` id, reused as the padding token.
pub const END_OF_TEXT_ID: u32 = 50256;
const END_OF_TEXT: &str = "<|endoftext|>";

/// GPT-2 byte-level BPE tokenizer (`r50k_base`).
#[derive(Clone)]
pub struct Gpt2Tokenizer {
    bpe: Arc<CoreBPE>,
}

impl Gpt2Tokenizer {
    pub fn new() -> FableResult<Self> {
        let bpe = tiktoken_rs::r50k_base().map_err(|e| FableError::ModelError {
            model: "r50k_base".to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self { bpe: Arc::new(bpe) })
    }

    /// Decode a run of ordinary tokens. Byte sequences that are not valid
    /// UTF-8 on their own (split multi-byte characters) become U+FFFD.
    fn decode_ordinary(&self, ids: &[u32]) -> String {
        if ids.is_empty() {
            return String::new();
        }
        if let Ok(text) = self.bpe.decode(ids.iter().map(|&id| id as _).collect()) {
            return text;
        }
        let mut out = String::new();
        for &id in ids {
            match self.bpe.decode(vec![id as _]) {
                Ok(piece) => out.push_str(&piece),
                Err(_) => out.push(REPLACEMENT_CHAR),
            }
        }
        out
    }
}

impl Tokenizer for Gpt2Tokenizer {
    fn encode(&self, text: &str) -> FableResult<Vec<u32>> {
        Ok(self
            .bpe
            .encode_ordinary(text)
            .into_iter()
            .map(|t| t as u32)
            .collect())
    }

    fn decode(&self, ids: &[u32], skip_special_tokens: bool) -> FableResult<String> {
        let mut out = String::new();
        for chunk in ids.split_inclusive(|&id| id == END_OF_TEXT_ID) {
            let (ordinary, special) = match chunk.split_last() {
                Some((&last, rest)) if last == END_OF_TEXT_ID => (rest, true),
                _ => (chunk, false),
            };
            out.push_str(&self.decode_ordinary(ordinary));
            if special && !skip_special_tokens {
                out.push_str(END_OF_TEXT);
            }
        }
        Ok(out)
    }

    fn pad_token_id(&self) -> u32 {
        END_OF_TEXT_ID
    }
}
